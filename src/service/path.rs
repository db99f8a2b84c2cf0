// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Paths: references to server-side resources.
//!
//! Paths travel as `Path` interface fields, so any of these types can appear
//! wherever a call takes a path and the receiver learns which one from the
//! identity tag.

use crate::core::{BinaryObject, ObjectRef};

message! {
    /// A loaded capture.
    pub struct CapturePath = entity("path", "Capture") {
        pub id / "ID": id,
    }
}

message! {
    /// A replay device.
    pub struct DevicePath = entity("path", "Device") {
        pub id / "ID": id,
    }
}

message! {
    /// The atom list of a capture.
    pub struct AtomsPath = entity("path", "Atoms") {
        pub capture / "Capture": (pointer CapturePath),
    }
}

message! {
    /// A single atom in a capture.
    pub struct AtomPath = entity("path", "Atom") {
        pub atoms / "Atoms": (pointer AtomsPath),
        pub index / "Index": uint64,
    }
}

message! {
    /// Image metadata produced by a framebuffer request.
    pub struct ImageInfoPath = entity("path", "ImageInfo") {
        pub id / "ID": id,
    }
}

message! {
    /// Timing data produced by a timing request.
    pub struct TimingInfoPath = entity("path", "TimingInfo") {
        pub id / "ID": id,
    }
}

impl CapturePath {
    pub fn new(id: crate::core::TypeId) -> Self {
        Self { id }
    }

    /// Path to this capture's atom list.
    pub fn atoms(&self) -> AtomsPath {
        AtomsPath {
            capture: Some(self.clone()),
        }
    }
}

impl DevicePath {
    pub fn new(id: crate::core::TypeId) -> Self {
        Self { id }
    }
}

impl AtomsPath {
    /// Path to the atom at `index`.
    pub fn index(&self, index: u64) -> AtomPath {
        AtomPath {
            atoms: Some(self.clone()),
            index,
        }
    }
}

/// True if `obj` is one of the path types.
pub fn is_path(obj: &dyn BinaryObject) -> bool {
    obj.is::<CapturePath>()
        || obj.is::<DevicePath>()
        || obj.is::<AtomsPath>()
        || obj.is::<AtomPath>()
        || obj.is::<ImageInfoPath>()
        || obj.is::<TimingInfoPath>()
}

/// Box a path for an interface field.
pub fn boxed(path: impl BinaryObject) -> Option<ObjectRef> {
    Some(Box::new(path))
}
