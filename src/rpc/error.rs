// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Error types for the RPC layer.

use thiserror::Error;

use crate::core::{BinaryObject, CodecError, ObjectRef};

/// Result type for RPC operations.
pub type RpcResult<T> = Result<T, RpcError>;

/// Everything an RPC call can fail with, on one channel.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Request could not be encoded or response could not be decoded.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The transport failed to deliver the request or the response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with an application error payload.
    #[error("{kind}: {message}")]
    RemoteApplicationError {
        /// Error type, e.g. `ErrInvalidPath`
        kind: String,
        /// Human readable message
        message: String,
        /// The decoded error object
        payload: ObjectRef,
    },

    /// The response decoded to an object of the wrong type.
    #[error("unexpected response: expected {expected}, found {actual}")]
    UnexpectedResponse { expected: String, actual: String },

    /// The transport has shut down.
    #[error("channel closed")]
    Closed,
}

impl RpcError {
    /// Wrap a decoded application error payload.
    ///
    /// Returns the payload back if it is not an error type.
    pub fn from_payload(payload: ObjectRef) -> Result<Self, ObjectRef> {
        let Some((kind, message)) = payload
            .as_remote_error()
            .map(|e| (e.kind().to_string(), e.message()))
        else {
            return Err(payload);
        };
        Ok(RpcError::RemoteApplicationError {
            kind,
            message,
            payload,
        })
    }

    /// True if the server reported an application error.
    pub fn is_remote(&self) -> bool {
        matches!(self, RpcError::RemoteApplicationError { .. })
    }

    /// The application error payload, if any.
    pub fn payload(&self) -> Option<&dyn BinaryObject> {
        match self {
            RpcError::RemoteApplicationError { payload, .. } => Some(payload.as_ref()),
            _ => None,
        }
    }

    /// The application error payload as concrete type `T`.
    pub fn payload_as<T: BinaryObject>(&self) -> Option<&T> {
        self.payload().and_then(|p| p.downcast_ref::<T>())
    }
}
