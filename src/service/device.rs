// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Device description.

use crate::core::{Message, Result, TypeId};
use crate::encoding::{Decoder, Encoder};

/// Fixed wire identity of [`Device`].
pub const DEVICE_ID: TypeId = TypeId::from_bytes([
    84, 246, 143, 92, 204, 229, 30, 94, 58, 165, 150, 169, 199, 96, 3, 81, 103, 56, 79, 81,
]);

/// Description of a replay device.
///
/// `Device` is ID-keyed: its identity is a fixed constant rather than a hash
/// of its schema, so it has no [`Entity`](crate::schema::Entity).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Device {
    pub name: String,
    pub model: String,
    pub os: String,
    /// Size of a pointer in bytes
    pub pointer_size: u8,
    /// Alignment of a pointer in bytes
    pub pointer_alignment: u8,
    /// Maximum addressable memory in bytes
    pub max_memory_size: u64,
    pub extensions: String,
    pub renderer: String,
    pub vendor: String,
    pub version: String,
}

impl Device {
    pub fn with_name(mut self, v: impl Into<String>) -> Self {
        self.name = v.into();
        self
    }

    pub fn with_model(mut self, v: impl Into<String>) -> Self {
        self.model = v.into();
        self
    }

    pub fn with_os(mut self, v: impl Into<String>) -> Self {
        self.os = v.into();
        self
    }

    pub fn with_pointer_size(mut self, v: u8) -> Self {
        self.pointer_size = v;
        self
    }

    pub fn with_pointer_alignment(mut self, v: u8) -> Self {
        self.pointer_alignment = v;
        self
    }

    pub fn with_max_memory_size(mut self, v: u64) -> Self {
        self.max_memory_size = v;
        self
    }

    pub fn with_extensions(mut self, v: impl Into<String>) -> Self {
        self.extensions = v.into();
        self
    }

    pub fn with_renderer(mut self, v: impl Into<String>) -> Self {
        self.renderer = v.into();
        self
    }

    pub fn with_vendor(mut self, v: impl Into<String>) -> Self {
        self.vendor = v.into();
        self
    }

    pub fn with_version(mut self, v: impl Into<String>) -> Self {
        self.version = v.into();
        self
    }
}

impl Message for Device {
    const NAME: &'static str = "service.Device";

    fn type_identity() -> TypeId {
        DEVICE_ID
    }

    fn encode_fields(&self, e: &mut Encoder<'_>) -> Result<()> {
        e.string(&self.name)?;
        e.string(&self.model)?;
        e.string(&self.os)?;
        e.uint8(self.pointer_size)?;
        e.uint8(self.pointer_alignment)?;
        e.uint64(self.max_memory_size)?;
        e.string(&self.extensions)?;
        e.string(&self.renderer)?;
        e.string(&self.vendor)?;
        e.string(&self.version)
    }

    fn decode_fields(&mut self, d: &mut Decoder<'_>) -> Result<()> {
        self.name = d.string()?;
        self.model = d.string()?;
        self.os = d.string()?;
        self.pointer_size = d.uint8()?;
        self.pointer_alignment = d.uint8()?;
        self.max_memory_size = d.uint64()?;
        self.extensions = d.string()?;
        self.renderer = d.string()?;
        self.vendor = d.string()?;
        self.version = d.string()?;
        Ok(())
    }
}
