// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for rpclib.
//!
//! Errors fall into three groups that callers are expected to tell apart:
//! - [`CodecError::UnknownType`]: a well-formed stream naming a type this
//!   registry does not know (usually a newer peer)
//! - malformed stream errors: truncation, bad lengths, bad tags, limits
//! - registration errors: programming mistakes detected while building a registry

use std::fmt;

use crate::core::id::TypeId;

/// Errors that can occur while registering, encoding or decoding objects.
#[derive(Debug, Clone)]
pub enum CodecError {
    /// Type identity not present in the registry
    UnknownType {
        /// Identity that failed to resolve
        id: TypeId,
        /// Stream position just after the identity was read
        position: usize,
    },

    /// Structurally invalid byte sequence
    MalformedStream {
        /// Stream position where the problem was detected
        position: usize,
        /// What was wrong
        reason: String,
    },

    /// Buffer too short for requested read
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when error occurred
        cursor_pos: u64,
    },

    /// Length or count prefix exceeded the data bounds or configured limit
    LengthExceeded {
        /// Length that was read
        length: usize,
        /// Position in buffer
        position: usize,
        /// Buffer length or limit it was checked against
        buffer_len: usize,
    },

    /// Object nesting deeper than the configured limit
    DepthExceeded {
        /// Configured maximum depth
        limit: usize,
        /// Stream position when the limit was hit
        position: usize,
    },

    /// Decoded object had a different concrete type than the field requires
    TypeMismatch {
        /// What the field expected
        expected: String,
        /// What was found
        actual: String,
    },

    /// Two different classes registered under one identity
    DuplicateRegistration {
        /// Contested identity
        id: TypeId,
        /// Name of the class already registered
        existing: String,
        /// Name of the class that was rejected
        attempted: String,
    },

    /// Attempt to register an identity reserved for null or built-in value tags
    ReservedIdentity {
        /// The reserved identity
        id: TypeId,
    },

    /// Invalid schema description
    InvalidSchema {
        /// Schema name or identifier
        schema_name: String,
        /// Validation error message
        reason: String,
    },

    /// Underlying sink or source failed
    Io {
        /// Error message
        message: String,
    },

    /// Other error
    Other(String),
}

impl CodecError {
    /// Create an "unknown type" error.
    pub fn unknown_type(id: TypeId, position: usize) -> Self {
        CodecError::UnknownType { id, position }
    }

    /// Create a malformed stream error.
    pub fn malformed(position: usize, reason: impl Into<String>) -> Self {
        CodecError::MalformedStream {
            position,
            reason: reason.into(),
        }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, cursor_pos: u64) -> Self {
        CodecError::BufferTooShort {
            requested,
            available,
            cursor_pos,
        }
    }

    /// Create a length exceeded error.
    pub fn length_exceeded(length: usize, position: usize, buffer_len: usize) -> Self {
        CodecError::LengthExceeded {
            length,
            position,
            buffer_len,
        }
    }

    /// Create a depth exceeded error.
    pub fn depth_exceeded(limit: usize, position: usize) -> Self {
        CodecError::DepthExceeded { limit, position }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        CodecError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a duplicate registration error.
    pub fn duplicate_registration(
        id: TypeId,
        existing: impl Into<String>,
        attempted: impl Into<String>,
    ) -> Self {
        CodecError::DuplicateRegistration {
            id,
            existing: existing.into(),
            attempted: attempted.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(schema_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidSchema {
            schema_name: schema_name.into(),
            reason: reason.into(),
        }
    }

    /// True if the stream named a type the registry does not know.
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, CodecError::UnknownType { .. })
    }

    /// True if the stream itself is corrupt, truncated or over a limit.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            CodecError::MalformedStream { .. }
                | CodecError::BufferTooShort { .. }
                | CodecError::LengthExceeded { .. }
                | CodecError::DepthExceeded { .. }
                | CodecError::TypeMismatch { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::UnknownType { id, position } => {
                vec![("id", id.to_string()), ("position", position.to_string())]
            }
            CodecError::MalformedStream { position, reason } => {
                vec![("position", position.to_string()), ("reason", reason.clone())]
            }
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::LengthExceeded {
                length,
                position,
                buffer_len,
            } => vec![
                ("length", length.to_string()),
                ("position", position.to_string()),
                ("buffer_len", buffer_len.to_string()),
            ],
            CodecError::DepthExceeded { limit, position } => vec![
                ("limit", limit.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::TypeMismatch { expected, actual } => {
                vec![("expected", expected.clone()), ("actual", actual.clone())]
            }
            CodecError::DuplicateRegistration {
                id,
                existing,
                attempted,
            } => vec![
                ("id", id.to_string()),
                ("existing", existing.clone()),
                ("attempted", attempted.clone()),
            ],
            CodecError::ReservedIdentity { id } => vec![("id", id.to_string())],
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => vec![("schema", schema_name.clone()), ("reason", reason.clone())],
            CodecError::Io { message } => vec![("message", message.clone())],
            CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::UnknownType { id, position } => {
                write!(f, "Unknown type {id} at position {position}")
            }
            CodecError::MalformedStream { position, reason } => {
                write!(f, "Malformed stream at position {position}: {reason}")
            }
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => write!(
                f,
                "Buffer too short: requested {requested} bytes at position {cursor_pos}, but only {available} bytes available"
            ),
            CodecError::LengthExceeded {
                length,
                position,
                buffer_len,
            } => write!(
                f,
                "Length {length} exceeds buffer at position {position} (buffer length: {buffer_len})"
            ),
            CodecError::DepthExceeded { limit, position } => write!(
                f,
                "Nesting depth limit {limit} exceeded at position {position}"
            ),
            CodecError::TypeMismatch { expected, actual } => {
                write!(f, "Type mismatch: expected {expected}, found {actual}")
            }
            CodecError::DuplicateRegistration {
                id,
                existing,
                attempted,
            } => write!(
                f,
                "Duplicate registration of {id}: '{attempted}' conflicts with '{existing}'"
            ),
            CodecError::ReservedIdentity { id } => {
                write!(f, "Identity {id} is reserved")
            }
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => {
                write!(f, "Invalid schema '{schema_name}': {reason}")
            }
            CodecError::Io { message } => write!(f, "IO error: {message}"),
            CodecError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for rpclib codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
