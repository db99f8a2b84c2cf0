// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - decode an encoded object payload.
//!
//! Human output uses the compiled catalog types. JSON output decodes through
//! a registry built from the catalog schema so every entity-keyed object
//! comes back as named field values.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Args;
use rpclib::schema::SchemaMessage;
use rpclib::service::{self, Device};
use rpclib::{BinaryObject, CodecConfig, DynamicObject, ObjectCodec, Registry, TypeId, Value};
use serde::Serialize;

use crate::common::{catalog, output_json_or, parse_hex, Result};

/// Decode one object payload.
#[derive(Args, Clone, Debug)]
pub struct InspectCmd {
    /// File holding the encoded payload
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// The file holds hex text instead of raw bytes
    #[arg(long)]
    hex: bool,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

impl InspectCmd {
    pub fn run(self, config: CodecConfig) -> Result<()> {
        let raw = std::fs::read(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let data = if self.hex {
            parse_hex(&String::from_utf8_lossy(&raw))?
        } else {
            raw
        };

        let registry = if self.json {
            schema_registry()?
        } else {
            catalog()?
        };
        let codec = ObjectCodec::with_config(Arc::new(registry), config);
        let obj = codec.decode(&data)?;

        let report = Report::new(obj.as_deref(), data.len());
        output_json_or(self.json, &report, || {
            match obj.as_deref() {
                Some(obj) => {
                    println!("type:  {}", obj.type_name());
                    println!("id:    {}", obj.identity());
                    println!("bytes: {}", data.len());
                    println!();
                    println!("{obj:#?}");
                }
                None => println!("null ({} bytes)", data.len()),
            }
            Ok(())
        })
    }
}

// Compiled fixed-identity types plus dynamic classes for every catalog entity.
fn schema_registry() -> Result<Registry> {
    let mut registry = Registry::new();
    registry.register::<Device>()?;
    registry.register::<SchemaMessage>()?;
    registry.import_schema(&service::schema(&catalog()?))?;
    Ok(registry)
}

// Output types

#[derive(Serialize)]
struct Report<'a> {
    #[serde(rename = "type")]
    type_name: Option<String>,
    id: TypeId,
    bytes: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldReport<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug: Option<String>,
}

#[derive(Serialize)]
struct FieldReport<'a> {
    name: &'a str,
    value: &'a Value,
}

impl<'a> Report<'a> {
    fn new(obj: Option<&'a dyn BinaryObject>, bytes: usize) -> Self {
        let Some(obj) = obj else {
            return Self {
                type_name: None,
                id: TypeId::NULL,
                bytes,
                fields: Vec::new(),
                debug: None,
            };
        };

        match obj.downcast_ref::<DynamicObject>() {
            Some(dynamic) => Self {
                type_name: Some(obj.type_name()),
                id: obj.identity(),
                bytes,
                fields: dynamic
                    .entity()
                    .fields
                    .iter()
                    .zip(dynamic.fields())
                    .map(|(field, value)| FieldReport {
                        name: &field.declared,
                        value,
                    })
                    .collect(),
                debug: None,
            },
            None => Self {
                type_name: Some(obj.type_name()),
                id: obj.identity(),
                bytes,
                fields: Vec::new(),
                debug: Some(format!("{obj:?}")),
            },
        }
    }
}
