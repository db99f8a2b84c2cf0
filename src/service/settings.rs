// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Request settings carried by value inside calls.

use std::convert::Infallible;
use std::ops::BitOr;

message! {
    /// Framebuffer render options.
    pub struct RenderSettings = entity("service", "RenderSettings") {
        pub max_width / "MaxWidth": uint32,
        pub max_height / "MaxHeight": uint32,
        pub wireframe / "Wireframe": bool,
    }
}

/// Bit set selecting what a timing request measures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimingFlags(pub i32);

impl TimingFlags {
    /// Time on the CPU (the default).
    pub const CPU: TimingFlags = TimingFlags(0);
    /// Time on the GPU.
    pub const GPU: TimingFlags = TimingFlags(1);
    /// Report per command.
    pub const PER_COMMAND: TimingFlags = TimingFlags(2);
    /// Report per draw call.
    pub const PER_DRAW_CALL: TimingFlags = TimingFlags(4);
    /// Report per frame.
    pub const PER_FRAME: TimingFlags = TimingFlags(8);

    /// True if every bit of `other` is set.
    pub fn contains(self, other: TimingFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for TimingFlags {
    type Output = TimingFlags;

    fn bitor(self, rhs: TimingFlags) -> TimingFlags {
        TimingFlags(self.0 | rhs.0)
    }
}

impl From<TimingFlags> for i32 {
    fn from(flags: TimingFlags) -> i32 {
        flags.0
    }
}

// Unknown bits are kept so newer peers' flags survive a round trip.
impl TryFrom<i32> for TimingFlags {
    type Error = Infallible;

    fn try_from(raw: i32) -> Result<Self, Infallible> {
        Ok(TimingFlags(raw))
    }
}
