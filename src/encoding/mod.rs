// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Binary encoding and decoding.
//!
//! This module provides the wire format:
//! - [`varint`] - LEB128 and zig-zag integer primitives
//! - [`encoder`] - Writes primitives, objects and variants
//! - [`decoder`] - Reads them back, resolving identities through a registry
//! - [`codec`] - Single top-level object payloads

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod varint;

pub use codec::ObjectCodec;
pub use decoder::Decoder;
pub use encoder::Encoder;
