// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Application error payloads.
//!
//! A server answers a failed call with one of these objects instead of the
//! call's result message. The client recognizes them through
//! [`BinaryObject::as_remote_error`](crate::core::BinaryObject::as_remote_error)
//! and surfaces them as a typed failure.

use crate::core::ObjectRef;

message! {
    /// Requested data cannot be produced.
    pub struct ErrDataUnavailable = entity("service", "ErrDataUnavailable") {
        pub reason / "Reason": string,
        /// Retrying later may succeed
        pub transient / "Transient": bool,
    }
    error(err) => format!("data unavailable: {}", err.reason)
}

message! {
    /// A path does not resolve.
    pub struct ErrInvalidPath = entity("service", "ErrInvalidPath") {
        pub reason / "Reason": string,
        pub path / "Path": (interface Path),
    }
    error(err) => format!("invalid path: {}", err.reason)
}

message! {
    /// A call argument is out of range or inconsistent.
    pub struct ErrInvalidArgument = entity("service", "ErrInvalidArgument") {
        pub reason / "Reason": string,
    }
    error(err) => format!("invalid argument: {}", err.reason)
}

message! {
    /// `follow` was asked to follow a path that does not link anywhere.
    pub struct ErrPathNotFollowable = entity("service", "ErrPathNotFollowable") {
        pub path / "Path": (interface Path),
    }
    error(err) => match &err.path {
        Some(path) => format!("path {} is not followable", path.type_name()),
        None => "null path is not followable".to_string(),
    }
}

message! {
    /// Failure of the RPC machinery itself: bad token, undecodable or
    /// unrouted request, handler panic.
    pub struct RpcException = entity("rpc", "Exception") {
        pub message / "Message": string,
    }
    error(err) => err.message.clone()
}

impl ErrDataUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            transient: false,
        }
    }
}

impl ErrInvalidPath {
    pub fn new(reason: impl Into<String>, path: Option<ObjectRef>) -> Self {
        Self {
            reason: reason.into(),
            path,
        }
    }
}

impl ErrInvalidArgument {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl RpcException {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
