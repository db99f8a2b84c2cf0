// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire-level type identities.
//!
//! A [`TypeId`] is a fixed 20-byte tag written raw (no length prefix) in front
//! of every encoded object and variant. Identities are content hashes: the
//! first 20 bytes of SHA-256 over a type name or an entity signature, so they
//! stay stable across processes as long as the hashed text does.
//!
//! Two ranges are reserved and never name a registered class:
//! - the all-zero identity encodes null
//! - identities whose first 19 bytes are zero are built-in variant tags

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Size of a type identity on the wire.
pub const TYPE_ID_SIZE: usize = 20;

/// Fixed-size binary tag identifying a concrete wire type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TypeId([u8; TYPE_ID_SIZE]);

impl TypeId {
    /// The identity written for a null object or null variant.
    pub const NULL: TypeId = TypeId([0; TYPE_ID_SIZE]);

    /// Wrap raw identity bytes.
    pub const fn from_bytes(bytes: [u8; TYPE_ID_SIZE]) -> Self {
        TypeId(bytes)
    }

    /// Identity for a reserved built-in variant tag.
    pub const fn builtin(code: u8) -> Self {
        let mut bytes = [0; TYPE_ID_SIZE];
        bytes[TYPE_ID_SIZE - 1] = code;
        TypeId(bytes)
    }

    /// Derive an identity by hashing a name or signature.
    pub fn from_name(name: &str) -> Self {
        let digest = Sha256::digest(name.as_bytes());
        let mut bytes = [0; TYPE_ID_SIZE];
        bytes.copy_from_slice(&digest[..TYPE_ID_SIZE]);
        TypeId(bytes)
    }

    /// Raw identity bytes.
    pub fn as_bytes(&self) -> &[u8; TYPE_ID_SIZE] {
        &self.0
    }

    /// True for the null identity.
    pub fn is_null(&self) -> bool {
        self.0 == [0; TYPE_ID_SIZE]
    }

    /// True for null and for every built-in variant tag.
    pub fn is_reserved(&self) -> bool {
        self.0[..TYPE_ID_SIZE - 1].iter().all(|b| *b == 0)
    }

    /// The built-in tag code, if this is a reserved non-null identity.
    pub fn builtin_code(&self) -> Option<u8> {
        if self.is_reserved() && !self.is_null() {
            Some(self.0[TYPE_ID_SIZE - 1])
        } else {
            None
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", hex::encode(self.0))
    }
}

/// Error returned when parsing a `TypeId` from hex fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTypeIdError {
    input: String,
}

impl fmt::Display for ParseTypeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid type identity '{}', expected {} hex characters",
            self.input,
            TYPE_ID_SIZE * 2
        )
    }
}

impl std::error::Error for ParseTypeIdError {}

impl FromStr for TypeId {
    type Err = ParseTypeIdError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let err = || ParseTypeIdError {
            input: s.to_string(),
        };
        let decoded = hex::decode(s.trim()).map_err(|_| err())?;
        let bytes: [u8; TYPE_ID_SIZE] = decoded.try_into().map_err(|_| err())?;
        Ok(TypeId(bytes))
    }
}

impl Serialize for TypeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TypeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
