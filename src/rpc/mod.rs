// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! RPC envelope layer.
//!
//! - [`transport`] - Request/response envelopes and the [`Transport`] trait
//! - [`client`] - [`RpcClient`], the typed adapter, and [`ServiceClient`]
//! - [`server`] - [`Server`], which routes decoded calls to handlers
//! - [`config`] - [`ClientConfig`]
//! - [`error`] - [`RpcError`]

pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use client::{RpcClient, ServiceClient};
pub use config::ClientConfig;
pub use error::{RpcError, RpcResult};
pub use server::{HandlerResult, Server};
pub use transport::{ChannelTransport, LocalTransport, Request, Response, Transport};
