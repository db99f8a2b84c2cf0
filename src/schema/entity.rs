// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema entities.
//!
//! An [`Entity`] describes one message type: its package, name and ordered
//! field list. Entity-keyed types derive their wire identity from the
//! entity's canonical [`signature`](Entity::signature), so any change to the
//! field layout yields a new identity and old peers see `UnknownType`
//! instead of misreading the stream.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::core::{CodecError, Message, Result, TypeId};
use crate::encoding::{Decoder, Encoder};

/// Primitive wire encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Method {
    Bool = 0,
    Int8 = 1,
    Uint8 = 2,
    Int16 = 3,
    Uint16 = 4,
    Int32 = 5,
    Uint32 = 6,
    Int64 = 7,
    Uint64 = 8,
    Float32 = 9,
    Float64 = 10,
    String = 11,
}

impl Method {
    /// Look up a method by its wire code.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Method::Bool,
            1 => Method::Int8,
            2 => Method::Uint8,
            3 => Method::Int16,
            4 => Method::Uint16,
            5 => Method::Int32,
            6 => Method::Uint32,
            7 => Method::Int64,
            8 => Method::Uint64,
            9 => Method::Float32,
            10 => Method::Float64,
            11 => Method::String,
            _ => return None,
        })
    }

    /// Convert to string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Bool => "bool",
            Method::Int8 => "int8",
            Method::Uint8 => "uint8",
            Method::Int16 => "int16",
            Method::Uint16 => "uint16",
            Method::Int32 => "int32",
            Method::Uint32 => "uint32",
            Method::Int64 => "int64",
            Method::Uint64 => "uint64",
            Method::Float32 => "float32",
            Method::Float64 => "float64",
            Method::String => "string",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire type of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    /// Scalar or string, `name` is the declared alias
    Primitive { name: String, method: Method },
    /// Message embedded by value, fields only
    Struct { name: String, id: TypeId },
    /// Identity-tagged, nullable object
    Pointer { to: Box<Type> },
    /// Identity-tagged object of any type implementing `name`
    Interface { name: String },
    /// Tagged value of a closed set of types
    Variant { name: String },
    /// Tagged value of any type
    Any,
    /// Count-prefixed sequence
    Slice { alias: String, value_type: Box<Type> },
    /// Fixed-length sequence, no count on the wire
    Array {
        alias: String,
        size: u32,
        value_type: Box<Type>,
    },
    /// Count-prefixed key/value pairs
    Map {
        alias: String,
        key_type: Box<Type>,
        value_type: Box<Type>,
    },
}

const KIND_PRIMITIVE: u8 = 1;
const KIND_STRUCT: u8 = 2;
const KIND_POINTER: u8 = 3;
const KIND_INTERFACE: u8 = 4;
const KIND_VARIANT: u8 = 5;
const KIND_ANY: u8 = 6;
const KIND_SLICE: u8 = 7;
const KIND_ARRAY: u8 = 8;
const KIND_MAP: u8 = 9;

impl Type {
    /// Primitive with its canonical name.
    pub fn primitive(method: Method) -> Self {
        Type::Primitive {
            name: method.as_str().to_string(),
            method,
        }
    }

    /// Primitive with a declared alias, e.g. an enum carried as int32.
    pub fn alias(name: impl Into<String>, method: Method) -> Self {
        Type::Primitive {
            name: name.into(),
            method,
        }
    }

    /// Message `T` embedded by value.
    pub fn value_of<T: Message>() -> Self {
        Type::Struct {
            name: T::NAME.to_string(),
            id: T::type_identity(),
        }
    }

    /// Nullable pointer to message `T`.
    pub fn pointer_to<T: Message>() -> Self {
        Type::Pointer {
            to: Box::new(Type::value_of::<T>()),
        }
    }

    /// Object implementing the named interface.
    pub fn interface(name: impl Into<String>) -> Self {
        Type::Interface { name: name.into() }
    }

    /// Count-prefixed sequence of `value_type`.
    pub fn slice(value_type: Type) -> Self {
        Type::Slice {
            alias: String::new(),
            value_type: Box::new(value_type),
        }
    }

    /// Fixed-length array of `value_type`.
    pub fn array(size: u32, value_type: Type) -> Self {
        Type::Array {
            alias: String::new(),
            size,
            value_type: Box::new(value_type),
        }
    }

    /// Map from `key_type` to `value_type`.
    pub fn map(key_type: Type, value_type: Type) -> Self {
        Type::Map {
            alias: String::new(),
            key_type: Box::new(key_type),
            value_type: Box::new(value_type),
        }
    }

    /// Number of values a zero-filled field of this type holds inline.
    ///
    /// Only fixed arrays contribute; nested arrays multiply.
    pub fn fixed_elements(&self) -> u64 {
        match self {
            Type::Array {
                size, value_type, ..
            } => u64::from(*size).saturating_mul(value_type.fixed_elements().max(1)),
            _ => 0,
        }
    }

    /// True for `uint8` primitives, which slices carry as raw blobs.
    pub fn is_byte(&self) -> bool {
        matches!(
            self,
            Type::Primitive {
                method: Method::Uint8,
                ..
            }
        )
    }

    /// Canonical text used in entity signatures.
    pub fn signature(&self) -> String {
        match self {
            Type::Primitive { name, method } if name.is_empty() || name == method.as_str() => {
                method.as_str().to_string()
            }
            Type::Primitive { name, method } => format!("{name}:{method}"),
            Type::Struct { name, .. } => name.clone(),
            Type::Pointer { to } => format!("*{}", to.signature()),
            Type::Interface { name } => format!("?{name}"),
            Type::Variant { name } => format!("<{name}>"),
            Type::Any => "any".to_string(),
            Type::Slice { value_type, .. } => format!("[]{}", value_type.signature()),
            Type::Array {
                size, value_type, ..
            } => format!("[{size}]{}", value_type.signature()),
            Type::Map {
                key_type,
                value_type,
                ..
            } => format!("map[{}]{}", key_type.signature(), value_type.signature()),
        }
    }

    /// Write this type description.
    pub fn encode(&self, e: &mut Encoder<'_>) -> Result<()> {
        match self {
            Type::Primitive { name, method } => {
                e.uint8(KIND_PRIMITIVE)?;
                e.string(name)?;
                e.uint8(*method as u8)
            }
            Type::Struct { name, id } => {
                e.uint8(KIND_STRUCT)?;
                e.string(name)?;
                e.id(id)
            }
            Type::Pointer { to } => {
                e.uint8(KIND_POINTER)?;
                to.encode(e)
            }
            Type::Interface { name } => {
                e.uint8(KIND_INTERFACE)?;
                e.string(name)
            }
            Type::Variant { name } => {
                e.uint8(KIND_VARIANT)?;
                e.string(name)
            }
            Type::Any => e.uint8(KIND_ANY),
            Type::Slice { alias, value_type } => {
                e.uint8(KIND_SLICE)?;
                e.string(alias)?;
                value_type.encode(e)
            }
            Type::Array {
                alias,
                size,
                value_type,
            } => {
                e.uint8(KIND_ARRAY)?;
                e.string(alias)?;
                e.uint32(*size)?;
                value_type.encode(e)
            }
            Type::Map {
                alias,
                key_type,
                value_type,
            } => {
                e.uint8(KIND_MAP)?;
                e.string(alias)?;
                key_type.encode(e)?;
                value_type.encode(e)
            }
        }
    }

    /// Read a type description.
    pub fn decode(d: &mut Decoder<'_>) -> Result<Type> {
        let position = d.position();
        let kind = d.uint8()?;
        d.nested(|d| {
            Ok(match kind {
                KIND_PRIMITIVE => {
                    let name = d.string()?;
                    let code_pos = d.position();
                    let code = d.uint8()?;
                    let method = Method::from_code(code).ok_or_else(|| {
                        CodecError::malformed(code_pos, format!("unknown method code {code}"))
                    })?;
                    Type::Primitive { name, method }
                }
                KIND_STRUCT => Type::Struct {
                    name: d.string()?,
                    id: d.id()?,
                },
                KIND_POINTER => Type::Pointer {
                    to: Box::new(Type::decode(d)?),
                },
                KIND_INTERFACE => Type::Interface { name: d.string()? },
                KIND_VARIANT => Type::Variant { name: d.string()? },
                KIND_ANY => Type::Any,
                KIND_SLICE => Type::Slice {
                    alias: d.string()?,
                    value_type: Box::new(Type::decode(d)?),
                },
                KIND_ARRAY => {
                    let alias = d.string()?;
                    let size_pos = d.position();
                    let size = d.uint32()?;
                    d.check_len(size as usize, size_pos)?;
                    Type::Array {
                        alias,
                        size,
                        value_type: Box::new(Type::decode(d)?),
                    }
                }
                KIND_MAP => Type::Map {
                    alias: d.string()?,
                    key_type: Box::new(Type::decode(d)?),
                    value_type: Box::new(Type::decode(d)?),
                },
                other => {
                    return Err(CodecError::malformed(
                        position,
                        format!("unknown type kind {other}"),
                    ))
                }
            })
        })
    }
}

/// One field of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Declared field name
    pub declared: String,
    /// Wire type
    #[serde(rename = "type")]
    pub ty: Type,
}

/// Reflective description of a message type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Package, e.g. `path`
    pub package: String,
    /// Type name within the package, e.g. `CapturePath`
    pub identity: String,
    /// Schema version, empty if unversioned
    pub version: String,
    /// Display name, empty to use `identity`
    pub display: String,
    /// Fields in wire order
    pub fields: Vec<Field>,
}

impl Entity {
    /// Create an entity with no fields.
    pub fn new(package: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            identity: identity.into(),
            version: String::new(),
            display: String::new(),
            fields: Vec::new(),
        }
    }

    /// Set the schema version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the display name.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }

    /// Append a field.
    pub fn with_field(mut self, declared: impl Into<String>, ty: Type) -> Self {
        self.fields.push(Field {
            declared: declared.into(),
            ty,
        });
        self
    }

    /// `package.identity`
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.package, self.identity)
    }

    /// Look up a field by declared name.
    pub fn field(&self, declared: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.declared == declared)
    }

    /// Position of a field by declared name.
    pub fn field_index(&self, declared: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.declared == declared)
    }

    /// Fail if any field's fixed arrays hold more than `max_collection_len`
    /// values in total.
    pub fn check_limits(&self, max_collection_len: u32) -> Result<()> {
        for field in &self.fields {
            let elements = field.ty.fixed_elements();
            if elements > u64::from(max_collection_len) {
                return Err(CodecError::invalid_schema(
                    self.full_name(),
                    format!(
                        "field '{}' holds {elements} fixed elements, limit is {max_collection_len}",
                        field.declared
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Canonical text covering everything that affects the wire layout.
    ///
    /// `package.Name@version{field:type,...}`; display names are excluded.
    pub fn signature(&self) -> String {
        let mut sig = self.full_name();
        if !self.version.is_empty() {
            sig.push('@');
            sig.push_str(&self.version);
        }
        sig.push('{');
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                sig.push(',');
            }
            sig.push_str(&field.declared);
            sig.push(':');
            sig.push_str(&field.ty.signature());
        }
        sig.push('}');
        sig
    }

    /// Wire identity derived from the signature.
    pub fn id(&self) -> TypeId {
        TypeId::from_name(&self.signature())
    }

    /// Write this entity by value.
    pub fn encode(&self, e: &mut Encoder<'_>) -> Result<()> {
        e.string(&self.package)?;
        e.string(&self.identity)?;
        e.string(&self.version)?;
        e.string(&self.display)?;
        e.slice(&self.fields, |e, field| {
            e.string(&field.declared)?;
            field.ty.encode(e)
        })
    }

    /// Read an entity by value.
    pub fn decode(d: &mut Decoder<'_>) -> Result<Entity> {
        Ok(Entity {
            package: d.string()?,
            identity: d.string()?,
            version: d.string()?,
            display: d.string()?,
            fields: d.slice(|d| {
                Ok(Field {
                    declared: d.string()?,
                    ty: Type::decode(d)?,
                })
            })?,
        })
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.full_name())?;
        for field in &self.fields {
            writeln!(f, "    {}: {}", field.declared, field.ty.signature())?;
        }
        write!(f, "}}")
    }
}

/// Lazily built entity for a compiled message type.
///
/// ```ignore
/// static ENTITY: StaticEntity = StaticEntity::new(|| Entity::new("path", "CapturePath"));
/// ```
pub struct StaticEntity {
    build: fn() -> Entity,
    cell: OnceLock<(Entity, TypeId)>,
}

impl StaticEntity {
    /// Wrap a builder; nothing runs until first use.
    pub const fn new(build: fn() -> Entity) -> Self {
        Self {
            build,
            cell: OnceLock::new(),
        }
    }

    fn init(&self) -> &(Entity, TypeId) {
        self.cell.get_or_init(|| {
            let entity = (self.build)();
            let id = entity.id();
            (entity, id)
        })
    }

    /// The built entity.
    pub fn get(&self) -> &Entity {
        &self.init().0
    }

    /// The entity's wire identity.
    pub fn id(&self) -> TypeId {
        self.init().1
    }
}
