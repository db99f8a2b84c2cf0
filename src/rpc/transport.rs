// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Transport layer abstraction.
//!
//! A transport moves one [`Request`] envelope to the server and brings one
//! [`Response`] back. It knows nothing about the codec: both envelopes carry
//! already-encoded objects.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::rpc::error::{RpcError, RpcResult};
use crate::rpc::server::Server;

/// Request envelope: one encoded call object plus the auth token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub request: Vec<u8>,
    pub token: String,
}

/// Response envelope: one encoded result or error object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub response: Vec<u8>,
}

/// A request/response byte transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver `request` to `method` and wait for the response.
    async fn call(&self, method: &str, request: Request) -> RpcResult<Response>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn call(&self, method: &str, request: Request) -> RpcResult<Response> {
        (**self).call(method, request).await
    }
}

/// Calls a [`Server`] directly on the caller's task.
#[derive(Clone)]
pub struct LocalTransport {
    server: Arc<Server>,
}

impl LocalTransport {
    pub fn new(server: Arc<Server>) -> Self {
        Self { server }
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn call(&self, method: &str, request: Request) -> RpcResult<Response> {
        Ok(self.server.handle(method, request))
    }
}

struct Envelope {
    method: String,
    request: Request,
    reply: oneshot::Sender<Response>,
}

/// Runs a [`Server`] on its own tokio task; requests and responses cross
/// over channels.
///
/// Dropping every clone of the transport stops the server task.
#[derive(Clone)]
pub struct ChannelTransport {
    tx: mpsc::Sender<Envelope>,
}

impl ChannelTransport {
    /// Spawn the server task. Must be called inside a tokio runtime.
    pub fn spawn(server: Arc<Server>, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<Envelope>(capacity.max(1));
        tokio::spawn(async move {
            while let Some(envelope) = rx.recv().await {
                let response = server.handle(&envelope.method, envelope.request);
                // The caller may have given up waiting.
                let _ = envelope.reply.send(response);
            }
            debug!("channel transport stopped");
        });
        Self { tx }
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn call(&self, method: &str, request: Request) -> RpcResult<Response> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Envelope {
                method: method.to_string(),
                request,
                reply,
            })
            .await
            .map_err(|_| RpcError::Closed)?;
        response.await.map_err(|_| RpcError::Closed)
    }
}
