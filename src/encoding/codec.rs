// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Whole-payload codec.
//!
//! [`ObjectCodec`] bundles a shared [`Registry`] with a [`CodecConfig`] and
//! turns single top-level objects into byte buffers and back. This is the
//! unit the RPC layer moves: one call object per request, one result or
//! error object per response.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use rpclib::encoding::ObjectCodec;
//! use rpclib::service::{self, Device};
//!
//! # fn main() -> rpclib::Result<()> {
//! let codec = ObjectCodec::new(Arc::new(service::registry()?));
//! let device = Device::default().with_name("Pixel").with_pointer_size(8);
//! let bytes = codec.encode(&device)?;
//! let back: Device = codec.decode_as(&bytes)?;
//! assert_eq!(back, device);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use super::{Decoder, Encoder};
use crate::core::{
    BinaryObject, CodecConfig, CodecError, Message, ObjectRef, Registry, Result,
};

/// Encodes and decodes single top-level objects.
#[derive(Debug, Clone)]
pub struct ObjectCodec {
    registry: Arc<Registry>,
    config: CodecConfig,
}

impl ObjectCodec {
    /// Create a codec with default limits.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::with_config(registry, CodecConfig::default())
    }

    /// Create a codec with explicit limits.
    pub fn with_config(registry: Arc<Registry>, config: CodecConfig) -> Self {
        Self { registry, config }
    }

    /// Registry used for decoding.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Active limits.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode one identity-tagged object.
    pub fn encode(&self, obj: &dyn BinaryObject) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut e = Encoder::with_registry(&mut buf, &self.registry, self.config);
        e.object(Some(obj))?;
        Ok(buf)
    }

    /// Decode one object, requiring the whole buffer to be consumed.
    pub fn decode(&self, data: &[u8]) -> Result<Option<ObjectRef>> {
        let mut d = Decoder::with_config(data, &self.registry, self.config);
        let obj = d.object()?;
        d.finish()?;
        Ok(obj)
    }

    /// Decode one non-null object of concrete type `T`.
    pub fn decode_as<T: Message>(&self, data: &[u8]) -> Result<T> {
        let mut d = Decoder::with_config(data, &self.registry, self.config);
        let obj = d.object_as::<T>()?;
        d.finish()?;
        obj.ok_or_else(|| CodecError::type_mismatch(T::NAME, "null"))
    }
}
