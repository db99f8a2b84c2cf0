// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven objects.
//!
//! A [`DynamicObject`] carries the fields of any entity-keyed type as
//! [`Value`]s, laid out by its [`Entity`]. It lets a client decode types it
//! was not compiled with once it has fetched the server's schema.

use std::any::Any;
use std::sync::Arc;

use crate::core::{BinaryObject, CodecError, Result, TypeId, Value};
use crate::encoding::{Decoder, Encoder};
use crate::schema::entity::{Entity, Method, Type};

/// An object whose layout comes from a runtime [`Entity`].
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicObject {
    entity: Arc<Entity>,
    id: TypeId,
    fields: Vec<Value>,
}

impl DynamicObject {
    /// Create an object with every field at its zero value.
    pub fn new(entity: Arc<Entity>) -> Self {
        let mut obj = Self::empty(entity);
        obj.fields = zero_fields(&obj.entity);
        obj
    }

    /// Create an object holding no field values yet.
    ///
    /// This is what registry factories hand to the decoder: nothing is
    /// allocated until fields are decoded or first [`set`](Self::set).
    pub fn empty(entity: Arc<Entity>) -> Self {
        let id = entity.id();
        Self {
            entity,
            id,
            fields: Vec::new(),
        }
    }

    fn is_populated(&self) -> bool {
        self.fields.len() == self.entity.fields.len()
    }

    /// Layout of this object.
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Field values in declared order; empty for an unpopulated object.
    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    /// Value of a field by declared name.
    pub fn get(&self, declared: &str) -> Option<&Value> {
        self.entity
            .field_index(declared)
            .and_then(|index| self.fields.get(index))
    }

    /// Replace a field by declared name.
    pub fn set(&mut self, declared: &str, value: Value) -> Result<()> {
        let index = self.entity.field_index(declared).ok_or_else(|| {
            CodecError::invalid_schema(
                self.entity.full_name(),
                format!("no field named '{declared}'"),
            )
        })?;
        if !self.is_populated() {
            self.fields = zero_fields(&self.entity);
        }
        self.fields[index] = value;
        Ok(())
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, declared: &str, value: impl Into<Value>) -> Result<Self> {
        self.set(declared, value.into())?;
        Ok(self)
    }
}

impl BinaryObject for DynamicObject {
    fn identity(&self) -> TypeId {
        self.id
    }

    fn type_name(&self) -> String {
        self.entity.full_name()
    }

    fn encode(&self, e: &mut Encoder<'_>) -> Result<()> {
        for (index, field) in self.entity.fields.iter().enumerate() {
            match self.fields.get(index) {
                Some(value) => encode_typed(e, &field.ty, value)?,
                None => encode_typed(e, &field.ty, &zero_value(&field.ty))?,
            }
        }
        Ok(())
    }

    fn decode(&mut self, d: &mut Decoder<'_>) -> Result<()> {
        let mut fields = Vec::with_capacity(self.entity.fields.len());
        for field in &self.entity.fields {
            fields.push(decode_typed(d, &field.ty)?);
        }
        self.fields = fields;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_object(&self) -> Box<dyn BinaryObject> {
        Box::new(self.clone())
    }

    fn eq_object(&self, other: &dyn BinaryObject) -> bool {
        other
            .as_any()
            .downcast_ref::<DynamicObject>()
            .is_some_and(|other| self == other)
    }
}

fn zero_fields(entity: &Entity) -> Vec<Value> {
    entity.fields.iter().map(|f| zero_value(&f.ty)).collect()
}

/// Zero value a freshly created object holds for a field of type `ty`.
pub fn zero_value(ty: &Type) -> Value {
    match ty {
        Type::Primitive { method, .. } => match method {
            Method::Bool => Value::Bool(false),
            Method::Int8 => Value::Int8(0),
            Method::Uint8 => Value::Uint8(0),
            Method::Int16 => Value::Int16(0),
            Method::Uint16 => Value::Uint16(0),
            Method::Int32 => Value::Int32(0),
            Method::Uint32 => Value::Uint32(0),
            Method::Int64 => Value::Int64(0),
            Method::Uint64 => Value::Uint64(0),
            Method::Float32 => Value::Float32(0.0),
            Method::Float64 => Value::Float64(0.0),
            Method::String => Value::String(String::new()),
        },
        Type::Slice { value_type, .. } if value_type.is_byte() => Value::Bytes(Vec::new()),
        Type::Slice { .. } => Value::Array(Vec::new()),
        Type::Array {
            size, value_type, ..
        } => Value::Array(vec![zero_value(value_type); *size as usize]),
        Type::Map { .. } => Value::Map(Vec::new()),
        Type::Struct { .. }
        | Type::Pointer { .. }
        | Type::Interface { .. }
        | Type::Variant { .. }
        | Type::Any => Value::Null,
    }
}

fn mismatch(ty: &Type, value: &Value) -> CodecError {
    CodecError::type_mismatch(ty.signature(), value.type_name())
}

/// Write `value` as a field of type `ty`.
pub fn encode_typed(e: &mut Encoder<'_>, ty: &Type, value: &Value) -> Result<()> {
    match (ty, value) {
        (Type::Primitive { method, .. }, _) => encode_primitive(e, *method, ty, value),
        (Type::Struct { id, .. }, Value::Object(obj)) if obj.identity() == *id => obj.encode(e),
        (Type::Pointer { .. } | Type::Interface { .. }, Value::Null) => e.object(None),
        (Type::Pointer { to }, Value::Object(obj)) => {
            if let Type::Struct { id, .. } = to.as_ref() {
                if obj.identity() != *id {
                    return Err(mismatch(to, value));
                }
            }
            e.object(Some(obj.as_ref()))
        }
        (Type::Interface { .. }, Value::Object(obj)) => e.object(Some(obj.as_ref())),
        (Type::Variant { .. } | Type::Any, _) => e.variant(value),
        (Type::Slice { value_type, .. }, Value::Bytes(bytes)) if value_type.is_byte() => {
            e.bytes(bytes)
        }
        (Type::Slice { value_type, .. }, Value::Array(items)) => {
            e.slice(items, |e, item| encode_typed(e, value_type, item))
        }
        (
            Type::Array {
                size, value_type, ..
            },
            Value::Array(items),
        ) => {
            if items.len() != *size as usize {
                return Err(CodecError::type_mismatch(
                    ty.signature(),
                    format!("array of {} elements", items.len()),
                ));
            }
            for item in items {
                encode_typed(e, value_type, item)?;
            }
            Ok(())
        }
        (
            Type::Map {
                key_type,
                value_type,
                ..
            },
            Value::Map(pairs),
        ) => e.slice(pairs, |e, (k, v)| {
            encode_typed(e, key_type, k)?;
            encode_typed(e, value_type, v)
        }),
        _ => Err(mismatch(ty, value)),
    }
}

fn encode_primitive(e: &mut Encoder<'_>, method: Method, ty: &Type, value: &Value) -> Result<()> {
    match (method, value) {
        (Method::Bool, Value::Bool(v)) => e.bool(*v),
        (Method::Int8, Value::Int8(v)) => e.int8(*v),
        (Method::Uint8, Value::Uint8(v)) => e.uint8(*v),
        (Method::Int16, Value::Int16(v)) => e.int16(*v),
        (Method::Uint16, Value::Uint16(v)) => e.uint16(*v),
        (Method::Int32, Value::Int32(v)) => e.int32(*v),
        (Method::Uint32, Value::Uint32(v)) => e.uint32(*v),
        (Method::Int64, Value::Int64(v)) => e.int64(*v),
        (Method::Uint64, Value::Uint64(v)) => e.uint64(*v),
        (Method::Float32, Value::Float32(v)) => e.float32(*v),
        (Method::Float64, Value::Float64(v)) => e.float64(*v),
        (Method::String, Value::String(v)) => e.string(v),
        _ => Err(mismatch(ty, value)),
    }
}

/// Read a field of type `ty`.
pub fn decode_typed(d: &mut Decoder<'_>, ty: &Type) -> Result<Value> {
    Ok(match ty {
        Type::Primitive { method, .. } => decode_primitive(d, *method)?,
        Type::Struct { id, .. } => {
            // By value: no identity on the wire, the layout comes from the
            // registry entry for the declared type.
            let class = d
                .registry()
                .get(id)
                .ok_or_else(|| CodecError::unknown_type(*id, d.position()))?;
            let mut obj = class.create();
            d.nested(|d| obj.decode(d))?;
            Value::Object(obj)
        }
        Type::Pointer { to } => match d.object()? {
            None => Value::Null,
            Some(obj) => {
                if let Type::Struct { id, name } = to.as_ref() {
                    if obj.identity() != *id {
                        return Err(CodecError::type_mismatch(name.clone(), obj.type_name()));
                    }
                }
                Value::Object(obj)
            }
        },
        Type::Interface { .. } => d.object()?.map(Value::Object).unwrap_or_default(),
        Type::Variant { .. } | Type::Any => d.variant()?,
        Type::Slice { value_type, .. } if value_type.is_byte() => Value::Bytes(d.bytes()?),
        Type::Slice { value_type, .. } => {
            Value::Array(d.slice(|d| decode_typed(d, value_type))?)
        }
        Type::Array {
            size, value_type, ..
        } => Value::Array(d.fixed(*size as usize, |d| decode_typed(d, value_type))?),
        Type::Map {
            key_type,
            value_type,
            ..
        } => Value::Map(d.slice(|d| {
            let key = decode_typed(d, key_type)?;
            let value = decode_typed(d, value_type)?;
            Ok((key, value))
        })?),
    })
}

fn decode_primitive(d: &mut Decoder<'_>, method: Method) -> Result<Value> {
    Ok(match method {
        Method::Bool => Value::Bool(d.bool()?),
        Method::Int8 => Value::Int8(d.int8()?),
        Method::Uint8 => Value::Uint8(d.uint8()?),
        Method::Int16 => Value::Int16(d.int16()?),
        Method::Uint16 => Value::Uint16(d.uint16()?),
        Method::Int32 => Value::Int32(d.int32()?),
        Method::Uint32 => Value::Uint32(d.uint32()?),
        Method::Int64 => Value::Int64(d.int64()?),
        Method::Uint64 => Value::Uint64(d.uint64()?),
        Method::Float32 => Value::Float32(d.float32()?),
        Method::Float64 => Value::Float64(d.float64()?),
        Method::String => Value::String(d.string()?),
    })
}
