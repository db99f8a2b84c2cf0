// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Id command - compute type identities.

use anyhow::anyhow;
use clap::Args;
use rpclib::TypeId;

use crate::common::{catalog, Result};

/// Compute the identity of a name.
#[derive(Args, Clone, Debug)]
pub struct IdCmd {
    /// Name or entity signature to hash
    #[arg(value_name = "NAME")]
    name: String,

    /// Look NAME up in the message catalog instead of hashing it
    #[arg(long = "type")]
    catalog_type: bool,
}

impl IdCmd {
    pub fn run(self) -> Result<()> {
        if !self.catalog_type {
            println!("{}", TypeId::from_name(&self.name));
            return Ok(());
        }

        let registry = catalog()?;
        let class = registry
            .classes()
            .into_iter()
            .find(|class| class.name() == self.name)
            .ok_or_else(|| anyhow!("no catalog type named {}", self.name))?;
        println!("{}", class.id());
        if let Some(entity) = class.entity() {
            println!("{}", entity.signature());
        }
        Ok(())
    }
}
