// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout rpclib.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error taxonomy
//! - [`TypeId`] - Fixed 20-byte wire identity
//! - [`BinaryObject`] / [`Message`] - Encodable object traits
//! - [`Registry`] - Identity to class lookup
//! - [`Value`] - Boxed "any" values for variant fields
//! - [`CodecConfig`] - Decoder limits

pub mod config;
pub mod error;
pub mod id;
pub mod object;
pub mod registry;
pub mod value;

pub use config::CodecConfig;
pub use error::{CodecError, Result};
pub use id::{ParseTypeIdError, TypeId, TYPE_ID_SIZE};
pub use object::{BinaryObject, Message, ObjectRef, RemoteError};
pub use registry::{Class, Factory, Registry};
pub use value::{Value, ValueKind};
