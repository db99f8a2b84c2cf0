// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod id;
mod inspect;
mod schema;

pub use id::IdCmd;
pub use inspect::InspectCmd;
pub use schema::SchemaCmd;
