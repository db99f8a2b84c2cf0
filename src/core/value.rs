// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Boxed "any" values.
//!
//! A [`Value`] is what travels through a variant field: a scalar, a blob, a
//! container of values, or any registered object. On the wire every value is
//! preceded by a [`TypeId`] tag so the reader can rebuild it without knowing
//! the static type. Scalars and containers use the reserved built-in tags
//! from [`ValueKind`]; objects use their own identity.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::core::id::TypeId;
use crate::core::object::ObjectRef;

/// Built-in variant tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueKind {
    /// Boolean
    Bool = 1,
    /// 8-bit signed integer
    Int8 = 2,
    /// 8-bit unsigned integer
    Uint8 = 3,
    /// 16-bit signed integer
    Int16 = 4,
    /// 16-bit unsigned integer
    Uint16 = 5,
    /// 32-bit signed integer
    Int32 = 6,
    /// 32-bit unsigned integer
    Uint32 = 7,
    /// 64-bit signed integer
    Int64 = 8,
    /// 64-bit unsigned integer
    Uint64 = 9,
    /// 32-bit float
    Float32 = 10,
    /// 64-bit float
    Float64 = 11,
    /// UTF-8 string
    String = 12,
    /// Raw byte blob
    Bytes = 13,
    /// Ordered sequence of values
    Array = 14,
    /// Ordered key/value pairs
    Map = 15,
}

impl ValueKind {
    /// Reserved identity used as the wire tag for this kind.
    pub const fn tag(self) -> TypeId {
        TypeId::builtin(self as u8)
    }

    /// Look up the kind for a built-in tag code.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => ValueKind::Bool,
            2 => ValueKind::Int8,
            3 => ValueKind::Uint8,
            4 => ValueKind::Int16,
            5 => ValueKind::Uint16,
            6 => ValueKind::Int32,
            7 => ValueKind::Uint32,
            8 => ValueKind::Int64,
            9 => ValueKind::Uint64,
            10 => ValueKind::Float32,
            11 => ValueKind::Float64,
            12 => ValueKind::String,
            13 => ValueKind::Bytes,
            14 => ValueKind::Array,
            15 => ValueKind::Map,
            _ => return None,
        })
    }

    /// Convert to string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int8 => "int8",
            ValueKind::Uint8 => "uint8",
            ValueKind::Int16 => "int16",
            ValueKind::Uint16 => "uint16",
            ValueKind::Int32 => "int32",
            ValueKind::Uint32 => "uint32",
            ValueKind::Int64 => "int64",
            ValueKind::Uint64 => "uint64",
            ValueKind::Float32 => "float32",
            ValueKind::Float64 => "float64",
            ValueKind::String => "string",
            ValueKind::Bytes => "bytes",
            ValueKind::Array => "array",
            ValueKind::Map => "map",
        }
    }
}

/// A value tagged with enough type information to decode without static
/// type knowledge.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Null,
    Bool(bool),
    Int8(i8),
    Uint8(u8),
    Int16(i16),
    Uint16(u16),
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
    /// Any registered object, boxed behind its identity
    Object(ObjectRef),
}

impl Value {
    /// Box an object into a value.
    pub fn object(obj: impl crate::core::object::BinaryObject) -> Self {
        Value::Object(Box::new(obj))
    }

    /// The built-in kind of this value, `None` for null and objects.
    pub fn kind(&self) -> Option<ValueKind> {
        Some(match self {
            Value::Null | Value::Object(_) => return None,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int8(_) => ValueKind::Int8,
            Value::Uint8(_) => ValueKind::Uint8,
            Value::Int16(_) => ValueKind::Int16,
            Value::Uint16(_) => ValueKind::Uint16,
            Value::Int32(_) => ValueKind::Int32,
            Value::Uint32(_) => ValueKind::Uint32,
            Value::Int64(_) => ValueKind::Int64,
            Value::Uint64(_) => ValueKind::Uint64,
            Value::Float32(_) => ValueKind::Float32,
            Value::Float64(_) => ValueKind::Float64,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Array(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Map,
        })
    }

    /// The wire tag this value is written with.
    pub fn tag(&self) -> TypeId {
        match self {
            Value::Null => TypeId::NULL,
            Value::Object(obj) => obj.identity(),
            other => other.kind().map(ValueKind::tag).unwrap_or(TypeId::NULL),
        }
    }

    /// Short description of the runtime type, used in errors.
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Object(obj) => obj.type_name(),
            other => other
                .kind()
                .map(|k| k.as_str().to_string())
                .unwrap_or_default(),
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the boxed object, if any.
    pub fn as_object(&self) -> Option<&dyn crate::core::object::BinaryObject> {
        match self {
            Value::Object(obj) => Some(obj.as_ref()),
            _ => None,
        }
    }

    /// Borrow the boxed object as concrete type `T`.
    pub fn downcast_ref<T: crate::core::object::BinaryObject>(&self) -> Option<&T> {
        self.as_object().and_then(|obj| obj.downcast_ref::<T>())
    }

    /// Get the string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Widen any integer value to i128.
    pub fn as_i128(&self) -> Option<i128> {
        Some(match self {
            Value::Int8(v) => *v as i128,
            Value::Uint8(v) => *v as i128,
            Value::Int16(v) => *v as i128,
            Value::Uint16(v) => *v as i128,
            Value::Int32(v) => *v as i128,
            Value::Uint32(v) => *v as i128,
            Value::Int64(v) => *v as i128,
            Value::Uint64(v) => *v as i128,
            _ => return None,
        })
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

// Objects serialize as `{"$type": name, "$id": hex, "debug": ...}` because a
// type-erased object has no field names outside of a schema.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int8(v) => serializer.serialize_i8(*v),
            Value::Uint8(v) => serializer.serialize_u8(*v),
            Value::Int16(v) => serializer.serialize_i16(*v),
            Value::Uint16(v) => serializer.serialize_u16(*v),
            Value::Int32(v) => serializer.serialize_i32(*v),
            Value::Uint32(v) => serializer.serialize_u32(*v),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Uint64(v) => serializer.serialize_u64(*v),
            Value::Float32(v) => serializer.serialize_f32(*v),
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Bytes(v) => serializer.serialize_str(&hex::encode(v)),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(pairs) => {
                let mut seq = serializer.serialize_seq(Some(pairs.len()))?;
                for pair in pairs {
                    seq.serialize_element(pair)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("$type", &obj.type_name())?;
                map.serialize_entry("$id", &obj.identity())?;
                map.serialize_entry("debug", &format!("{obj:?}"))?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_round_trip() {
        for code in 1..=15u8 {
            let kind = ValueKind::from_code(code).unwrap();
            assert_eq!(kind as u8, code);
            assert_eq!(kind.tag().builtin_code(), Some(code));
        }
        assert_eq!(ValueKind::from_code(0), None);
        assert_eq!(ValueKind::from_code(16), None);
    }

    #[test]
    fn test_null_tag_is_null_identity() {
        assert_eq!(Value::Null.tag(), TypeId::NULL);
        assert_eq!(Value::Int32(1).tag(), ValueKind::Int32.tag());
    }

    #[test]
    fn test_as_i128_widens() {
        assert_eq!(Value::Uint64(u64::MAX).as_i128(), Some(u64::MAX as i128));
        assert_eq!(Value::Int8(-3).as_i128(), Some(-3));
        assert_eq!(Value::String("x".into()).as_i128(), None);
    }

    #[test]
    fn test_serialize_scalars_and_containers() {
        let value = Value::Array(vec![
            Value::from(1i32),
            Value::from("a"),
            Value::Bytes(vec![0xab]),
            Value::Null,
        ]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[1,"a","ab",null]"#);
    }
}
