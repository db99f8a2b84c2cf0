// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # rpclib CLI
//!
//! Command-line companion for the binary object codec.
//!
//! ## Usage
//!
//! ```sh
//! # Hash a name into a type identity
//! rpclib id service.Device
//!
//! # List every type in the message catalog
//! rpclib schema list
//!
//! # Show one entity and its signature
//! rpclib schema show path.Atom --json
//!
//! # Decode a payload captured off the wire
//! rpclib inspect payload.bin
//! rpclib inspect payload.hex --hex --json
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmd::{IdCmd, InspectCmd, SchemaCmd};
use common::Result;
use tracing_subscriber::EnvFilter;

/// rpclib - binary object codec toolkit
///
/// Compute identities, browse the message catalog and decode payloads.
#[derive(Parser, Clone)]
#[command(name = "rpclib")]
#[command(about = "Binary object codec and RPC message toolkit", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Codec configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Compute the type identity of a name
    Id(IdCmd),

    /// Browse the message catalog (list, show)
    #[command(subcommand)]
    Schema(SchemaCmd),

    /// Decode an encoded object payload
    Inspect(InspectCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = common::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Id(cmd) => cmd.run(),
        Commands::Schema(cmd) => cmd.run(),
        Commands::Inspect(cmd) => cmd.run(config),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
