// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use anyhow::Context as _;
use rpclib::{service, CodecConfig, Registry};
use serde::Serialize;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Load the codec configuration, or defaults when no file was given.
pub fn load_config(path: Option<&Path>) -> Result<CodecConfig> {
    match path {
        Some(path) => CodecConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(CodecConfig::default()),
    }
}

/// Registry holding the full message catalog.
pub fn catalog() -> Result<Registry> {
    Ok(service::registry()?)
}

/// Parse hex text, ignoring whitespace.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&digits).context("invalid hex input")
}

/// Print `value` as pretty JSON, or run the human-readable printer.
pub fn output_json_or<T>(
    json: bool,
    value: &T,
    human_fn: impl FnOnce() -> std::io::Result<()>,
) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn()?;
    }
    Ok(())
}
