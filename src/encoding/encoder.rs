// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Binary encoder.
//!
//! Writes primitives, identity-tagged objects and variants into any
//! [`Write`] sink. Every write method has a [`Decoder`](super::Decoder)
//! counterpart that consumes exactly the bytes it produced.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use super::varint::{write_uvarint, zigzag_encode};
use crate::core::{BinaryObject, CodecConfig, CodecError, Message, Registry, Result, TypeId, Value};

/// Binary encoder over a byte sink.
///
/// # Example
///
/// ```
/// use rpclib::encoding::Encoder;
///
/// let mut buf = Vec::new();
/// let mut e = Encoder::new(&mut buf);
/// e.uint32(300).unwrap();
/// e.string("hi").unwrap();
/// assert_eq!(buf, vec![0xac, 0x02, 0x02, b'h', b'i']);
/// ```
pub struct Encoder<'a> {
    sink: &'a mut dyn Write,
    registry: Option<&'a Registry>,
    config: CodecConfig,
    written: usize,
}

impl<'a> Encoder<'a> {
    /// Create an encoder that writes any object it is given.
    pub fn new(sink: &'a mut dyn Write) -> Self {
        Self {
            sink,
            registry: None,
            config: CodecConfig::default(),
            written: 0,
        }
    }

    /// Create an encoder that checks objects against a registry when
    /// `config.strict_encode` is set.
    pub fn with_registry(
        sink: &'a mut dyn Write,
        registry: &'a Registry,
        config: CodecConfig,
    ) -> Self {
        Self {
            sink,
            registry: Some(registry),
            config,
            written: 0,
        }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn written(&self) -> usize {
        self.written
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.sink.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    fn uvarint(&mut self, value: u64) -> Result<()> {
        self.written += write_uvarint(&mut *self.sink, value)?;
        Ok(())
    }

    /// Write a boolean as one byte.
    pub fn bool(&mut self, value: bool) -> Result<()> {
        self.write_all(&[value as u8])
    }

    /// Write a signed byte.
    pub fn int8(&mut self, value: i8) -> Result<()> {
        self.write_all(&[value as u8])
    }

    /// Write an unsigned byte.
    pub fn uint8(&mut self, value: u8) -> Result<()> {
        self.write_all(&[value])
    }

    /// Write a zig-zag varint i16.
    pub fn int16(&mut self, value: i16) -> Result<()> {
        self.uvarint(zigzag_encode(value as i64))
    }

    /// Write a varint u16.
    pub fn uint16(&mut self, value: u16) -> Result<()> {
        self.uvarint(value as u64)
    }

    /// Write a zig-zag varint i32.
    pub fn int32(&mut self, value: i32) -> Result<()> {
        self.uvarint(zigzag_encode(value as i64))
    }

    /// Write a varint u32.
    pub fn uint32(&mut self, value: u32) -> Result<()> {
        self.uvarint(value as u64)
    }

    /// Write a zig-zag varint i64.
    pub fn int64(&mut self, value: i64) -> Result<()> {
        self.uvarint(zigzag_encode(value))
    }

    /// Write a varint u64.
    pub fn uint64(&mut self, value: u64) -> Result<()> {
        self.uvarint(value)
    }

    /// Write a little-endian f32.
    pub fn float32(&mut self, value: f32) -> Result<()> {
        self.sink.write_f32::<LittleEndian>(value)?;
        self.written += 4;
        Ok(())
    }

    /// Write a little-endian f64.
    pub fn float64(&mut self, value: f64) -> Result<()> {
        self.sink.write_f64::<LittleEndian>(value)?;
        self.written += 8;
        Ok(())
    }

    /// Write a collection element count as uint32.
    pub fn count(&mut self, len: usize) -> Result<()> {
        let len = u32::try_from(len).map_err(|_| {
            CodecError::length_exceeded(len, self.written, u32::MAX as usize)
        })?;
        self.uint32(len)
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn string(&mut self, value: &str) -> Result<()> {
        self.count(value.len())?;
        self.write_all(value.as_bytes())
    }

    /// Write a length-prefixed byte blob.
    pub fn bytes(&mut self, value: &[u8]) -> Result<()> {
        self.count(value.len())?;
        self.write_all(value)
    }

    /// Write a raw 20-byte identity.
    pub fn id(&mut self, id: &TypeId) -> Result<()> {
        self.write_all(id.as_bytes())
    }

    /// Write an identity-tagged object, or the null identity for `None`.
    pub fn object(&mut self, obj: Option<&dyn BinaryObject>) -> Result<()> {
        let Some(obj) = obj else {
            return self.id(&TypeId::NULL);
        };
        let id = obj.identity();
        if id.is_reserved() {
            return Err(CodecError::ReservedIdentity { id });
        }
        if self.config.strict_encode && !self.registry.is_some_and(|r| r.contains(&id)) {
            return Err(CodecError::unknown_type(id, self.written));
        }
        self.id(&id)?;
        obj.encode(self)
    }

    /// Write a message by value: its fields only, no identity.
    pub fn struct_value<T: Message>(&mut self, value: &T) -> Result<()> {
        value.encode_fields(self)
    }

    /// Write a tagged value that can be decoded without static type knowledge.
    pub fn variant(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.id(&TypeId::NULL),
            Value::Object(obj) => self.object(Some(obj.as_ref())),
            other => {
                self.id(&other.tag())?;
                self.variant_payload(other)
            }
        }
    }

    fn variant_payload(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null | Value::Object(_) => Ok(()),
            Value::Bool(v) => self.bool(*v),
            Value::Int8(v) => self.int8(*v),
            Value::Uint8(v) => self.uint8(*v),
            Value::Int16(v) => self.int16(*v),
            Value::Uint16(v) => self.uint16(*v),
            Value::Int32(v) => self.int32(*v),
            Value::Uint32(v) => self.uint32(*v),
            Value::Int64(v) => self.int64(*v),
            Value::Uint64(v) => self.uint64(*v),
            Value::Float32(v) => self.float32(*v),
            Value::Float64(v) => self.float64(*v),
            Value::String(v) => self.string(v),
            Value::Bytes(v) => self.bytes(v),
            Value::Array(items) => self.slice(items, |e, item| e.variant(item)),
            Value::Map(pairs) => self.slice(pairs, |e, (k, v)| {
                e.variant(k)?;
                e.variant(v)
            }),
        }
    }

    /// Write a count-prefixed sequence, encoding each element with `f`.
    pub fn slice<T>(
        &mut self,
        items: &[T],
        mut f: impl FnMut(&mut Self, &T) -> Result<()>,
    ) -> Result<()> {
        self.count(items.len())?;
        for item in items {
            f(self, item)?;
        }
        Ok(())
    }
}
