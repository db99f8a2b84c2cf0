// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Client configuration.
//!
//! ```toml
//! auth_token = "s3cret"
//!
//! [codec]
//! max_depth = 32
//! strict_encode = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{CodecConfig, CodecError, Result};

/// Settings for an [`RpcClient`](crate::rpc::RpcClient).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Token sent with every request.
    pub auth_token: String,
    /// Codec limits for requests and responses.
    pub codec: CodecConfig,
}

impl ClientConfig {
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            codec: CodecConfig::default(),
        }
    }

    /// Parse a configuration from TOML text. Missing keys keep defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| CodecError::Other(format!("invalid client config: {e}")))
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn with_codec(mut self, codec: CodecConfig) -> Self {
        self.codec = codec;
        self
    }
}
