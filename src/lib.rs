// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # rpclib
//!
//! Schema-driven binary object codec with a polymorphic type registry and an
//! RPC envelope client.
//!
//! Every encodable type carries a fixed 20-byte [`TypeId`]. Objects go on the
//! wire as their identity followed by their fields in declared order, so a
//! decoder holding a [`Registry`] can rebuild a value whose concrete type it
//! only learns from the stream.
//!
//! ## Architecture
//!
//! - `core/` - Identities, object traits, the registry, boxed values, errors
//! - `encoding/` - [`Encoder`], [`Decoder`] and the [`ObjectCodec`] facade
//! - `schema/` - Entity descriptors, schema-driven [`DynamicObject`]s
//! - `service/` - The generated message catalog
//! - `rpc/` - Envelopes, transports, client adapter and call dispatcher
//!
//! ## Example: Round-tripping a message
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use rpclib::service::{self, Device};
//! use rpclib::ObjectCodec;
//!
//! let codec = ObjectCodec::new(Arc::new(service::registry()?));
//! let device = Device::default().with_name("Pixel").with_pointer_size(8);
//! let bytes = codec.encode(&device)?;
//! let decoded: Device = codec.decode_as(&bytes)?;
//! assert_eq!(decoded, device);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Calling a service
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use rpclib::rpc::{LocalTransport, RpcClient, Server, ServiceClient};
//! use rpclib::service::{self, CallGetFeatures};
//!
//! let registry = Arc::new(service::registry()?);
//! let mut server = Server::new(Arc::clone(&registry), "token");
//! server.route::<CallGetFeatures, _>(|_| Ok(vec!["timing".to_string()]));
//!
//! let client = RpcClient::new(LocalTransport::new(Arc::new(server)), registry, "token");
//! let features = client.get_features().await?;
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{
    BinaryObject, Class, CodecConfig, CodecError, Message, ObjectRef, Registry, RemoteError,
    Result, TypeId, Value, ValueKind,
};

// Encoding/decoding
pub mod encoding;

pub use encoding::{Decoder, Encoder, ObjectCodec};

// Schema reflection
pub mod schema;

pub use schema::{DynamicObject, Entity, Field, Method, SchemaMessage, Type};

// Message catalog
pub mod service;

// RPC envelope layer
pub mod rpc;

pub use rpc::{RpcClient, RpcError, ServiceClient};
