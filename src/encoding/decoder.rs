// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Binary decoder.
//!
//! Mirror of [`Encoder`](super::Encoder): reads from an in-memory buffer in
//! exactly the order the encoder wrote. Objects and variants are rebuilt by
//! resolving their identity through a [`Registry`], creating a default
//! instance and letting it read its own fields.
//!
//! Failures never panic. An identity the registry does not know stops the
//! decode right after the 20 identity bytes with `UnknownType`; anything
//! structurally wrong is reported as a malformed-stream error.

use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, trace};

use super::varint::{read_uvarint, zigzag_decode, VarintError};
use crate::core::{
    CodecConfig, CodecError, Message, ObjectRef, Registry, Result, TypeId, Value, ValueKind,
    TYPE_ID_SIZE,
};

/// Binary decoder over a byte slice.
pub struct Decoder<'a> {
    data: &'a [u8],
    offset: usize,
    registry: &'a Registry,
    config: CodecConfig,
    depth: usize,
}

impl<'a> Decoder<'a> {
    /// Create a decoder with default limits.
    pub fn new(data: &'a [u8], registry: &'a Registry) -> Self {
        Self::with_config(data, registry, CodecConfig::default())
    }

    /// Create a decoder with explicit limits.
    pub fn with_config(data: &'a [u8], registry: &'a Registry, config: CodecConfig) -> Self {
        Self {
            data,
            offset: 0,
            registry,
            config,
            depth: 0,
        }
    }

    /// Registry used to resolve identities.
    #[inline]
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Get the current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Fail if any bytes are left unread.
    pub fn finish(&self) -> Result<()> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(CodecError::malformed(
                self.offset,
                format!("{} trailing bytes", self.remaining()),
            ))
        }
    }

    /// Read a byte slice.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::buffer_too_short(
                count,
                self.remaining(),
                self.offset as u64,
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    fn uvarint(&mut self, bits: u32) -> Result<u64> {
        match read_uvarint(&self.data[self.offset..], bits) {
            Ok((value, len)) => {
                self.offset += len;
                Ok(value)
            }
            Err(VarintError::Truncated) => Err(CodecError::buffer_too_short(
                1,
                0,
                self.data.len() as u64,
            )),
            Err(VarintError::Overflow) => Err(CodecError::malformed(
                self.offset,
                format!("varint overflows {bits} bits"),
            )),
        }
    }

    /// Read a boolean byte; anything but 0 or 1 is malformed.
    pub fn bool(&mut self) -> Result<bool> {
        let position = self.offset;
        match self.uint8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::malformed(
                position,
                format!("invalid bool byte {other}"),
            )),
        }
    }

    /// Read a signed byte.
    pub fn int8(&mut self) -> Result<i8> {
        Ok(self.uint8()? as i8)
    }

    /// Read an unsigned byte.
    pub fn uint8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Read a zig-zag varint i16.
    pub fn int16(&mut self) -> Result<i16> {
        let position = self.offset;
        let value = zigzag_decode(self.uvarint(16)?);
        i16::try_from(value)
            .map_err(|_| CodecError::malformed(position, format!("{value} overflows int16")))
    }

    /// Read a varint u16.
    pub fn uint16(&mut self) -> Result<u16> {
        Ok(self.uvarint(16)? as u16)
    }

    /// Read a zig-zag varint i32.
    pub fn int32(&mut self) -> Result<i32> {
        let position = self.offset;
        let value = zigzag_decode(self.uvarint(32)?);
        i32::try_from(value)
            .map_err(|_| CodecError::malformed(position, format!("{value} overflows int32")))
    }

    /// Read a varint u32.
    pub fn uint32(&mut self) -> Result<u32> {
        Ok(self.uvarint(32)? as u32)
    }

    /// Read a zig-zag varint i64.
    pub fn int64(&mut self) -> Result<i64> {
        Ok(zigzag_decode(self.uvarint(64)?))
    }

    /// Read a varint u64.
    pub fn uint64(&mut self) -> Result<u64> {
        self.uvarint(64)
    }

    /// Read a little-endian f32.
    pub fn float32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.read_bytes(4)?))
    }

    /// Read a little-endian f64.
    pub fn float64(&mut self) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.read_bytes(8)?))
    }

    /// Read a uint32 element count, checked against the configured limit.
    pub fn count(&mut self) -> Result<usize> {
        let position = self.offset;
        let count = self.uint32()? as usize;
        self.check_len(count, position)?;
        Ok(count)
    }

    /// Fail if `len` elements exceed the configured collection limit.
    pub fn check_len(&self, len: usize, position: usize) -> Result<()> {
        let max = self.config.max_collection_len as usize;
        if len > max {
            return Err(CodecError::length_exceeded(len, position, max));
        }
        Ok(())
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn string(&mut self) -> Result<String> {
        let len = self.count()?;
        let position = self.offset;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| CodecError::malformed(position, format!("invalid UTF-8 string: {e}")))
    }

    /// Read a length-prefixed byte blob.
    pub fn bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.count()?;
        Ok(self.read_bytes(len)?.to_vec())
    }

    /// Read a raw 20-byte identity.
    pub fn id(&mut self) -> Result<TypeId> {
        let bytes = self.read_bytes(TYPE_ID_SIZE)?;
        let mut id = [0; TYPE_ID_SIZE];
        id.copy_from_slice(bytes);
        Ok(TypeId::from_bytes(id))
    }

    /// Read an identity-tagged object; the null identity yields `None`.
    pub fn object(&mut self) -> Result<Option<ObjectRef>> {
        let start = self.offset;
        let id = self.id()?;
        if id.is_null() {
            return Ok(None);
        }
        if id.is_reserved() {
            return Err(CodecError::malformed(
                start,
                format!("built-in value tag {id} where an object was expected"),
            ));
        }
        self.registered(id).map(Some)
    }

    /// Read an object that must be of concrete type `T` (or null).
    pub fn object_as<T: Message>(&mut self) -> Result<Option<T>> {
        match self.object()? {
            None => Ok(None),
            Some(obj) => {
                let actual = obj.type_name();
                obj.downcast::<T>()
                    .map(|obj| Some(*obj))
                    .ok_or_else(|| CodecError::type_mismatch(T::NAME, actual))
            }
        }
    }

    /// Read a message by value: its fields only, no identity.
    pub fn struct_value<T: Message>(&mut self) -> Result<T> {
        self.nested(|d| {
            let mut value = T::default();
            value.decode_fields(d)?;
            Ok(value)
        })
    }

    /// Read a tagged value written by [`Encoder::variant`](super::Encoder::variant).
    pub fn variant(&mut self) -> Result<Value> {
        let start = self.offset;
        let id = self.id()?;
        if id.is_null() {
            return Ok(Value::Null);
        }
        if let Some(code) = id.builtin_code() {
            let kind = ValueKind::from_code(code).ok_or_else(|| {
                CodecError::malformed(start, format!("unknown built-in value tag {code}"))
            })?;
            return self.nested(|d| d.variant_payload(kind));
        }
        self.registered(id).map(Value::Object)
    }

    fn variant_payload(&mut self, kind: ValueKind) -> Result<Value> {
        Ok(match kind {
            ValueKind::Bool => Value::Bool(self.bool()?),
            ValueKind::Int8 => Value::Int8(self.int8()?),
            ValueKind::Uint8 => Value::Uint8(self.uint8()?),
            ValueKind::Int16 => Value::Int16(self.int16()?),
            ValueKind::Uint16 => Value::Uint16(self.uint16()?),
            ValueKind::Int32 => Value::Int32(self.int32()?),
            ValueKind::Uint32 => Value::Uint32(self.uint32()?),
            ValueKind::Int64 => Value::Int64(self.int64()?),
            ValueKind::Uint64 => Value::Uint64(self.uint64()?),
            ValueKind::Float32 => Value::Float32(self.float32()?),
            ValueKind::Float64 => Value::Float64(self.float64()?),
            ValueKind::String => Value::String(self.string()?),
            ValueKind::Bytes => Value::Bytes(self.bytes()?),
            ValueKind::Array => Value::Array(self.slice(|d| d.variant())?),
            ValueKind::Map => Value::Map(self.slice(|d| Ok((d.variant()?, d.variant()?)))?),
        })
    }

    /// Resolve, create and populate a registered object.
    fn registered(&mut self, id: TypeId) -> Result<ObjectRef> {
        let registry = self.registry;
        let class = registry.get(&id).ok_or_else(|| {
            debug!(%id, position = self.offset, "unknown type identity");
            CodecError::unknown_type(id, self.offset)
        })?;
        let mut obj = class.create();
        self.nested(|d| obj.decode(d))?;
        trace!(name = class.name(), end = self.offset, "decoded object");
        Ok(obj)
    }

    /// Read a count-prefixed sequence, decoding each element with `f`.
    pub fn slice<T>(&mut self, mut f: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        let count = self.count()?;
        // Elements may be zero-sized, so the count is not bounded by the
        // remaining bytes; only the preallocation is.
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(f(self)?);
        }
        Ok(items)
    }

    /// Read exactly `count` elements with no count prefix.
    pub fn fixed<T>(
        &mut self,
        count: usize,
        mut f: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        self.check_len(count, self.offset)?;
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(f(self)?);
        }
        Ok(items)
    }

    /// Run `f` one nesting level deeper, enforcing `max_depth`.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.config.max_depth {
            return Err(CodecError::depth_exceeded(
                self.config.max_depth,
                self.offset,
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Encoder;

    fn encode(f: impl FnOnce(&mut Encoder<'_>) -> Result<()>) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut e = Encoder::new(&mut buf);
        f(&mut e).unwrap();
        buf
    }

    #[test]
    fn test_scalars_round_trip() {
        let data = encode(|e| {
            e.bool(true)?;
            e.int8(-5)?;
            e.int16(-300)?;
            e.uint16(65535)?;
            e.int32(i32::MIN)?;
            e.uint32(u32::MAX)?;
            e.int64(i64::MIN)?;
            e.uint64(4_294_967_296)?;
            e.float32(-2.5)?;
            e.float64(1e300)
        });
        let registry = Registry::new();
        let mut d = Decoder::new(&data, &registry);
        assert!(d.bool().unwrap());
        assert_eq!(d.int8().unwrap(), -5);
        assert_eq!(d.int16().unwrap(), -300);
        assert_eq!(d.uint16().unwrap(), 65535);
        assert_eq!(d.int32().unwrap(), i32::MIN);
        assert_eq!(d.uint32().unwrap(), u32::MAX);
        assert_eq!(d.int64().unwrap(), i64::MIN);
        assert_eq!(d.uint64().unwrap(), 4_294_967_296);
        assert_eq!(d.float32().unwrap(), -2.5);
        assert_eq!(d.float64().unwrap(), 1e300);
        d.finish().unwrap();
    }

    #[test]
    fn test_invalid_bool() {
        let registry = Registry::new();
        let mut d = Decoder::new(&[2], &registry);
        let err = d.bool().unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_truncated_string() {
        // claims 5 bytes, has 2
        let registry = Registry::new();
        let mut d = Decoder::new(&[5, b'a', b'b'], &registry);
        let err = d.string().unwrap_err();
        assert!(matches!(err, CodecError::BufferTooShort { requested: 5, available: 2, .. }));
    }

    #[test]
    fn test_invalid_utf8() {
        let registry = Registry::new();
        let mut d = Decoder::new(&[2, 0xc3, 0x28], &registry);
        let err = d.string().unwrap_err();
        assert!(matches!(err, CodecError::MalformedStream { position: 1, .. }));
    }

    #[test]
    fn test_count_limit() {
        let data = encode(|e| e.uint32(11));
        let registry = Registry::new();
        let config = CodecConfig::default().with_max_collection_len(10);
        let mut d = Decoder::with_config(&data, &registry, config);
        let err = d.count().unwrap_err();
        assert!(matches!(err, CodecError::LengthExceeded { length: 11, .. }));
    }

    #[test]
    fn test_truncated_varint() {
        let registry = Registry::new();
        let mut d = Decoder::new(&[0x80], &registry);
        assert!(d.uint32().unwrap_err().is_malformed());
    }

    #[test]
    fn test_truncated_identity() {
        let registry = Registry::new();
        let mut d = Decoder::new(&[0; 19], &registry);
        assert!(d.object().unwrap_err().is_malformed());
    }

    #[test]
    fn test_null_object_and_variant() {
        let registry = Registry::new();
        let data = [0u8; 40];
        let mut d = Decoder::new(&data, &registry);
        assert!(d.object().unwrap().is_none());
        assert_eq!(d.variant().unwrap(), Value::Null);
        d.finish().unwrap();
    }

    #[test]
    fn test_unknown_object_stops_after_identity() {
        let registry = Registry::new();
        let mut data = TypeId::from_name("service.Future").as_bytes().to_vec();
        data.extend_from_slice(&[1, 2, 3]);
        let mut d = Decoder::new(&data, &registry);
        let err = d.object().unwrap_err();
        assert!(matches!(err, CodecError::UnknownType { position: 20, .. }));
        assert_eq!(d.position(), 20);
    }

    #[test]
    fn test_builtin_tag_where_object_expected() {
        let registry = Registry::new();
        let data = encode(|e| e.variant(&Value::Int32(1)));
        let mut d = Decoder::new(&data, &registry);
        assert!(d.object().unwrap_err().is_malformed());
    }

    #[test]
    fn test_unknown_builtin_tag() {
        let registry = Registry::new();
        let data = TypeId::builtin(99).as_bytes().to_vec();
        let mut d = Decoder::new(&data, &registry);
        assert!(d.variant().unwrap_err().is_malformed());
    }

    #[test]
    fn test_scalar_variants_round_trip() {
        let values = vec![
            Value::Bool(false),
            Value::Int8(-1),
            Value::Uint8(255),
            Value::Int16(-2),
            Value::Uint16(2),
            Value::Int32(-3),
            Value::Uint32(3),
            Value::Int64(-4),
            Value::Uint64(4),
            Value::Float32(0.25),
            Value::Float64(-0.5),
            Value::String("héllo".into()),
            Value::Bytes(vec![0, 1, 2]),
            Value::Array(vec![Value::Int32(1), Value::Null, Value::String("x".into())]),
            Value::Map(vec![(Value::String("k".into()), Value::Uint64(9))]),
        ];
        let registry = Registry::new();
        for value in values {
            let data = encode(|e| e.variant(&value));
            let mut d = Decoder::new(&data, &registry);
            assert_eq!(d.variant().unwrap(), value);
            d.finish().unwrap();
        }
    }

    #[test]
    fn test_depth_limit_on_nested_arrays() {
        let mut value = Value::Int32(0);
        for _ in 0..5 {
            value = Value::Array(vec![value]);
        }
        let data = encode(|e| e.variant(&value));
        let registry = Registry::new();

        let config = CodecConfig::default().with_max_depth(3);
        let mut d = Decoder::with_config(&data, &registry, config);
        let err = d.variant().unwrap_err();
        assert!(matches!(err, CodecError::DepthExceeded { limit: 3, .. }));

        let mut d = Decoder::new(&data, &registry);
        assert_eq!(d.variant().unwrap(), value);
    }

    #[test]
    fn test_trailing_bytes() {
        let registry = Registry::new();
        let mut d = Decoder::new(&[1, 0], &registry);
        d.uint8().unwrap();
        assert!(d.finish().unwrap_err().is_malformed());
    }

    #[test]
    fn test_int32_overflow_is_malformed() {
        let data = encode(|e| e.int64(i64::from(i32::MAX) + 1));
        let registry = Registry::new();
        let mut d = Decoder::new(&data, &registry);
        assert!(d.int32().unwrap_err().is_malformed());
    }
}
