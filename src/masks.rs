//! Fixed lane-permutation patterns for butterflies that cross lanes inside
//! one vector register.

use std::fmt;

use serde::Serialize;

/// One of the five fixed 4-lane patterns stored at the tail of the
/// constant table.
///
/// Declaration order is the buffer order. The digits in each label are the
/// literal elements stored in the table; the kernel interprets blends as
/// per-lane select bits and shuffles as gather indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LaneMask {
    /// `[1, 1, 0, 0]` — blend selecting the high pair of lanes.
    BlendHalves,
    /// `[1, 0, 1, 0]` — blend selecting the even lanes.
    BlendEven,
    /// `[0, 1, 0, 1]` — full four-lane shuffle replicating the low pair.
    ShuffleLowPair,
    /// `[2, 3, 2, 3]` — pair order reversed, high pair first.
    ReversePairs,
    /// `[1, 0, 3, 2]` — each adjacent pair rotated by one lane.
    RotatePairs,
}

impl LaneMask {
    /// Element count of every mask region.
    pub const LEN: usize = 4;

    /// All masks, in buffer declaration order.
    pub const ALL: [LaneMask; 5] = [
        LaneMask::BlendHalves,
        LaneMask::BlendEven,
        LaneMask::ShuffleLowPair,
        LaneMask::ReversePairs,
        LaneMask::RotatePairs,
    ];

    /// The four elements stored for this mask.
    pub const fn pattern(self) -> [i32; Self::LEN] {
        match self {
            LaneMask::BlendHalves => [1, 1, 0, 0],
            LaneMask::BlendEven => [1, 0, 1, 0],
            LaneMask::ShuffleLowPair => [0, 1, 0, 1],
            LaneMask::ReversePairs => [2, 3, 2, 3],
            LaneMask::RotatePairs => [1, 0, 3, 2],
        }
    }

    /// Stable region label, e.g. `mask_1100`.
    pub const fn label(self) -> &'static str {
        match self {
            LaneMask::BlendHalves => "mask_1100",
            LaneMask::BlendEven => "mask_1010",
            LaneMask::ShuffleLowPair => "mask_0101",
            LaneMask::ReversePairs => "mask_2323",
            LaneMask::RotatePairs => "mask_1032",
        }
    }
}

impl fmt::Display for LaneMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
