// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Vertex stream formats.

use std::fmt;

/// One component of a vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VectorElement {
    #[default]
    X,
    Y,
    Z,
    W,
}

impl From<VectorElement> for i32 {
    fn from(element: VectorElement) -> i32 {
        match element {
            VectorElement::X => 0,
            VectorElement::Y => 1,
            VectorElement::Z => 2,
            VectorElement::W => 3,
        }
    }
}

impl TryFrom<i32> for VectorElement {
    type Error = i32;

    fn try_from(raw: i32) -> Result<Self, i32> {
        match raw {
            0 => Ok(VectorElement::X),
            1 => Ok(VectorElement::Y),
            2 => Ok(VectorElement::Z),
            3 => Ok(VectorElement::W),
            other => Err(other),
        }
    }
}

impl fmt::Display for VectorElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VectorElement::X => "X",
            VectorElement::Y => "Y",
            VectorElement::Z => "Z",
            VectorElement::W => "W",
        };
        f.write_str(name)
    }
}

message! {
    /// Vector packed into a single uint32.
    pub struct FmtPackedUint32 = entity("vertex", "FmtPackedUint32") {
        /// Component order, least significant bits first
        pub order / "Order": (enums32 VectorElement),
        pub signed / "Signed": bool,
        pub normalized / "Normalized": bool,
        /// Bit width of each component, parallel to `order`
        pub bit_counts / "BitCounts": bytes,
    }
}

impl FmtPackedUint32 {
    /// Total bits used by all components.
    pub fn total_bits(&self) -> u32 {
        self.bit_counts.iter().map(|&b| u32::from(b)).sum()
    }
}
