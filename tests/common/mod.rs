// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use rpclib::schema::SchemaMessage;
use rpclib::service::{self, AtomPath, CapturePath, Device};
use rpclib::{Message, ObjectCodec, Registry, TypeId};

// ============================================================================
// Registries
// ============================================================================

/// Registry holding the compiled message catalog.
pub fn catalog() -> Arc<Registry> {
    Arc::new(service::registry().expect("catalog registers cleanly"))
}

/// Registry that knows the catalog only through its schema: every
/// entity-keyed type decodes as a dynamic object.
pub fn schema_only() -> Arc<Registry> {
    let mut registry = Registry::new();
    registry.register::<Device>().unwrap();
    registry.register::<SchemaMessage>().unwrap();
    registry
        .import_schema(&service::schema(&catalog()))
        .unwrap();
    Arc::new(registry)
}

pub fn codec() -> ObjectCodec {
    ObjectCodec::new(catalog())
}

// ============================================================================
// Fixtures
// ============================================================================

/// Encode then decode `msg` through the catalog codec.
pub fn round_trip<T: Message>(msg: &T) -> T {
    let codec = codec();
    let bytes = codec.encode(msg).expect("encode");
    codec.decode_as::<T>(&bytes).expect("decode")
}

pub fn capture(name: &str) -> CapturePath {
    CapturePath::new(TypeId::from_name(name))
}

pub fn atom(capture_name: &str, index: u64) -> AtomPath {
    capture(capture_name).atoms().index(index)
}

pub fn pixel() -> Device {
    Device::default()
        .with_name("Pixel")
        .with_model("sailfish")
        .with_os("Android 7.1")
        .with_pointer_size(8)
        .with_pointer_alignment(8)
        .with_max_memory_size(4_294_967_296)
        .with_vendor("Qualcomm")
}
