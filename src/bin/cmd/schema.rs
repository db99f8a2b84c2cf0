// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - browse the message catalog.

use anyhow::anyhow;
use clap::Subcommand;
use rpclib::{Entity, TypeId};
use serde::Serialize;

use crate::common::{catalog, output_json_or, Result};

/// Schema operations.
#[derive(Subcommand, Clone, Debug)]
pub enum SchemaCmd {
    /// List every registered type
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the fields and signature of one type
    Show {
        /// Fully qualified type name, e.g. path.Atom
        #[arg(value_name = "TYPE")]
        name: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

impl SchemaCmd {
    pub fn run(self) -> Result<()> {
        match self {
            SchemaCmd::List { json } => cmd_list(json),
            SchemaCmd::Show { name, json } => cmd_show(&name, json),
        }
    }
}

fn cmd_list(json: bool) -> Result<()> {
    let registry = catalog()?;
    let mut items: Vec<SchemaItem> = registry
        .classes()
        .into_iter()
        .map(|class| SchemaItem {
            name: class.name().to_string(),
            id: class.id(),
            fields: class.entity().map(|e| e.fields.len()),
        })
        .collect();
    items.sort_by(|a, b| a.name.cmp(&b.name));

    output_json_or(json, &items, || {
        println!("=== Message Types ({}) ===", items.len());
        println!();
        for item in &items {
            match item.fields {
                Some(n) => println!("{}  {}  ({} fields)", item.id, item.name, n),
                None => println!("{}  {}  (fixed identity)", item.id, item.name),
            }
        }
        Ok(())
    })
}

fn cmd_show(name: &str, json: bool) -> Result<()> {
    let registry = catalog()?;
    let class = registry
        .classes()
        .into_iter()
        .find(|class| class.name() == name)
        .ok_or_else(|| anyhow!("no catalog type named {name}"))?;
    let entity = class
        .entity()
        .ok_or_else(|| anyhow!("{name} has a fixed identity and no schema entity"))?;

    let detail = EntityDetail {
        name: entity.full_name(),
        id: class.id(),
        signature: entity.signature(),
        entity,
    };

    output_json_or(json, &detail, || {
        println!("=== {} ===", detail.name);
        println!("id:        {}", detail.id);
        println!("signature: {}", detail.signature);
        println!();
        for field in &entity.fields {
            println!("  {}: {}", field.declared, field.ty.signature());
        }
        Ok(())
    })
}

// Output types

#[derive(Serialize)]
struct SchemaItem {
    name: String,
    id: TypeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<usize>,
}

#[derive(Serialize)]
struct EntityDetail<'a> {
    name: String,
    id: TypeId,
    signature: String,
    entity: &'a Entity,
}
