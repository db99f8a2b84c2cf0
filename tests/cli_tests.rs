// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual rpclib binary and verify its behavior.

mod common;

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rpclib::service::{self, CapturePath, DEVICE_ID};
use rpclib::{Message, TypeId};

use common::{atom, codec, pixel};

/// Path to the built rpclib binary
fn rpclib_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rpclib"))
}

/// Run rpclib with arguments
fn run(args: &[&str]) -> Output {
    let bin = rpclib_bin();
    Command::new(&bin)
        .args(args)
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin))
}

/// Run rpclib and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run rpclib and assert failure
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command unexpectedly succeeded: {:?}\nstdout: {}",
        args,
        String::from_utf8_lossy(&output.stdout)
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// id
// ============================================================================

#[test]
fn test_id_hashes_name() {
    let out = run_ok(&["id", "hello"]);
    assert_eq!(out.trim(), TypeId::from_name("hello").to_string());
}

#[test]
fn test_id_catalog_type() {
    let out = run_ok(&["id", "--type", "path.Capture"]);
    let mut lines = out.lines();
    assert_eq!(
        lines.next().unwrap(),
        CapturePath::type_identity().to_string()
    );
    assert_eq!(lines.next().unwrap(), "path.Capture{ID:[20]uint8}");

    let out = run_ok(&["id", "--type", "service.Device"]);
    assert_eq!(out.trim(), DEVICE_ID.to_string());
}

#[test]
fn test_id_unknown_catalog_type() {
    let err = run_err(&["id", "--type", "nope.Nothing"]);
    assert!(err.contains("no catalog type named nope.Nothing"), "{err}");
}

// ============================================================================
// schema
// ============================================================================

#[test]
fn test_schema_list() {
    let out = run_ok(&["schema", "list"]);
    assert!(out.contains("service.Device"));
    assert!(out.contains("(fixed identity)"));
    assert!(out.contains("vertex.FmtPackedUint32"));
}

#[test]
fn test_schema_list_json() {
    let out = run_ok(&["schema", "list", "--json"]);
    let items: serde_json::Value = serde_json::from_str(&out).unwrap();
    let items = items.as_array().unwrap();
    let registry = service::registry().unwrap();
    assert_eq!(items.len(), registry.len());
    assert!(items
        .iter()
        .any(|item| item["name"] == "path.Atom" && item["fields"] == 2));
}

#[test]
fn test_schema_show_json() {
    let out = run_ok(&["schema", "show", "stringtable.Info", "--json"]);
    let detail: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        detail["signature"],
        "stringtable.Info{CultureCode:string,EntryCount:uint32}"
    );
    assert_eq!(detail["entity"]["fields"][0]["declared"], "CultureCode");
    assert_eq!(detail["entity"]["fields"][1]["type"]["kind"], "primitive");
}

#[test]
fn test_schema_show_fixed_identity_type() {
    let err = run_err(&["schema", "show", "service.Device"]);
    assert!(err.contains("fixed identity"), "{err}");
}

// ============================================================================
// inspect
// ============================================================================

#[test]
fn test_inspect_binary() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("device.bin");
    std::fs::write(&file, codec().encode(&pixel()).unwrap()).unwrap();

    let out = run_ok(&["inspect", path_str(&file)]);
    assert!(out.contains("type:  service.Device"));
    assert!(out.contains(&DEVICE_ID.to_string()));
    assert!(out.contains("Pixel"));
}

#[test]
fn test_inspect_hex_json() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("atom.hex");
    std::fs::write(&file, hex::encode(codec().encode(&atom("c", 5)).unwrap())).unwrap();

    let out = run_ok(&["inspect", path_str(&file), "--hex", "--json"]);
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["type"], "path.Atom");
    assert_eq!(report["fields"][1]["name"], "Index");
    assert_eq!(report["fields"][1]["value"], 5);
}

#[test]
fn test_inspect_null() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("null.bin");
    std::fs::write(&file, [0u8; 20]).unwrap();
    let out = run_ok(&["inspect", path_str(&file)]);
    assert!(out.starts_with("null"));
}

#[test]
fn test_inspect_garbage_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("garbage.bin");
    std::fs::write(&file, [1, 2, 3]).unwrap();
    run_err(&["inspect", path_str(&file)]);
}

#[test]
fn test_inspect_respects_config() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("atom.bin");
    std::fs::write(&file, codec().encode(&atom("c", 5)).unwrap()).unwrap();
    let config = dir.path().join("codec.toml");
    std::fs::write(&config, "max_depth = 1\n").unwrap();

    let err = run_err(&["--config", path_str(&config), "inspect", path_str(&file)]);
    assert!(err.contains("depth"), "{err}");
}

#[test]
fn test_missing_file() {
    let err = run_err(&["inspect", "/nonexistent/payload.bin"]);
    assert!(err.contains("failed to read"), "{err}");
}
