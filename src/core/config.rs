// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec configuration.
//!
//! Limits protect decoders from hostile or corrupt input: every count and
//! length prefix is checked against `max_collection_len` and against the
//! bytes actually left in the buffer, and object nesting is capped at
//! `max_depth`.
//!
//! ```toml
//! max_depth = 32
//! max_collection_len = 65536
//! strict_encode = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{CodecError, Result};

/// Default maximum nesting of objects, variants and by-value structs.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default maximum element count or byte length of a single collection.
pub const DEFAULT_MAX_COLLECTION_LEN: u32 = 16 * 1024 * 1024;

/// Limits and switches shared by encoders and decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Maximum nesting depth accepted while decoding.
    pub max_depth: usize,
    /// Maximum element count or byte length of one collection.
    pub max_collection_len: u32,
    /// Refuse to encode objects whose identity is not in the registry.
    pub strict_encode: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_collection_len: DEFAULT_MAX_COLLECTION_LEN,
            strict_encode: false,
        }
    }
}

impl CodecConfig {
    /// Parse a configuration from TOML text. Missing keys keep defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| CodecError::Other(format!("invalid codec config: {e}")))
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the maximum collection length.
    pub fn with_max_collection_len(mut self, max_collection_len: u32) -> Self {
        self.max_collection_len = max_collection_len;
        self
    }

    /// Enable or disable strict encoding.
    pub fn with_strict_encode(mut self, strict_encode: bool) -> Self {
        self.strict_encode = strict_encode;
        self
    }
}
