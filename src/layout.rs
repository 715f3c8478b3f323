//! Region model and offset accumulation for the flat constant table.
//!
//! The table consumed by the vector NTT/INTT kernel is one contiguous
//! buffer of `i32` elements. Each named region holds either the twiddle
//! slots of a single (transform, layer) or (transform, layer, phase) pair,
//! or one lane-permutation mask. The kernel indexes the buffer exclusively
//! through the offsets computed here, with no bounds checks, so the whole
//! map is re-derived from the structural parameters and validated before it
//! is handed out.

use std::fmt;

use itertools::Itertools;
use serde::Serialize;
use serde::Serializer;

use crate::error::LayoutError;
use crate::error::Result;
use crate::masks::LaneMask;
use crate::params::NttShape;

/// Direction of the transform a twiddle region belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Transform {
    Forward,
    Inverse,
}

/// Semantic kind of a region.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum RegionKind {
    ForwardTwiddle,
    InverseTwiddle,
    Mask,
}

/// Typed name of one region of the constant table.
///
/// `phase` is `Some` exactly for the layers the kernel processes
/// register-resident, one quarter of the coefficients at a time.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RegionId {
    Twiddle {
        transform: Transform,
        layer: u8,
        phase: Option<u8>,
    },
    Mask(LaneMask),
}

impl RegionId {
    pub const fn kind(&self) -> RegionKind {
        match self {
            RegionId::Twiddle {
                transform: Transform::Forward,
                ..
            } => RegionKind::ForwardTwiddle,
            RegionId::Twiddle {
                transform: Transform::Inverse,
                ..
            } => RegionKind::InverseTwiddle,
            RegionId::Mask(_) => RegionKind::Mask,
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionId::Twiddle {
                transform,
                layer,
                phase,
            } => {
                let dir = match transform {
                    Transform::Forward => "fwd",
                    Transform::Inverse => "inv",
                };
                match phase {
                    Some(p) => write!(f, "zeta_{dir}_p{p}_l{layer}"),
                    None => write!(f, "zeta_{dir}_l{layer}"),
                }
            }
            RegionId::Mask(mask) => write!(f, "{mask}"),
        }
    }
}

impl Serialize for RegionId {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// One contiguous sub-range of the flat buffer, in element units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Region {
    pub id: RegionId,
    pub kind: RegionKind,
    pub offset: usize,
    pub len: usize,
}

impl Region {
    /// One past the last element of this region.
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Butterfly distance of a layer: half the size of the groups it splits
/// (forward) or merges (inverse).
#[inline]
pub(crate) fn butterfly_distance(
    shape: &NttShape,
    transform: Transform,
    layer: u8,
) -> usize {
    match transform {
        Transform::Forward => shape.degree >> (layer as u32 + 1),
        Transform::Inverse => 1 << layer,
    }
}

/// Whether a layer's twiddles are partitioned across phases.
///
/// Split layers form the register-resident pass: the last `layers/2`
/// layers of the forward transform and, mirrored, the first `layers/2`
/// layers of the inverse.
#[inline]
pub(crate) fn is_split(
    shape: &NttShape,
    transform: Transform,
    layer: u8,
) -> bool {
    match transform {
        Transform::Forward => layer as u32 >= shape.split_boundary(),
        Transform::Inverse => (layer as u32) < shape.split_boundary(),
    }
}

/// How many times each half of a twiddle slot is replicated.
///
/// When the butterfly distance is smaller than a vector register, every
/// butterfly sharing the zeta needs its own lane, so the value/helper pair
/// is stored once per butterfly of the group.
#[inline]
pub(crate) fn replication(shape: &NttShape, distance: usize) -> usize {
    if distance < shape.lanes {
        distance
    } else {
        1
    }
}

/// Zetas stored in one region: all of the layer's zetas, or one phase's
/// share for split layers.
#[inline]
pub(crate) fn zetas_per_region(
    shape: &NttShape,
    transform: Transform,
    layer: u8,
) -> usize {
    let zetas = shape.degree / (2 * butterfly_distance(shape, transform, layer));
    if is_split(shape, transform, layer) {
        zetas / shape.phases
    } else {
        zetas
    }
}

/// Element count of one twiddle region.
pub fn region_len(shape: &NttShape, transform: Transform, layer: u8) -> usize {
    let distance = butterfly_distance(shape, transform, layer);
    zetas_per_region(shape, transform, layer) * 2 * replication(shape, distance)
}

/// The complete, validated region map of one constant table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableLayout {
    shape: NttShape,
    regions: Vec<Region>,
    total_len: usize,
}

impl TableLayout {
    /// Lay out every region for `shape` and validate the result.
    ///
    /// The declaration order is fixed: forward unsplit layers, forward
    /// split layers phase by phase, inverse split layers phase by phase,
    /// inverse unsplit layers, then the five masks. A violated invariant
    /// aborts generation; no partially laid-out table is ever returned.
    pub fn generate(shape: NttShape) -> Result<Self> {
        shape.validate()?;

        let mut regions = Vec::new();
        let mut cursor = 0usize;
        let mut push = |regions: &mut Vec<Region>, id: RegionId, len: usize| {
            regions.push(Region {
                id,
                kind: id.kind(),
                offset: cursor,
                len,
            });
            cursor += len;
        };

        let split = shape.split_boundary() as u8;
        let layers = shape.layers as u8;

        for layer in 0..split {
            let id = RegionId::Twiddle {
                transform: Transform::Forward,
                layer,
                phase: None,
            };
            push(&mut regions, id, region_len(&shape, Transform::Forward, layer));
        }
        for phase in 0..shape.phases as u8 {
            for layer in split..layers {
                let id = RegionId::Twiddle {
                    transform: Transform::Forward,
                    layer,
                    phase: Some(phase),
                };
                push(&mut regions, id, region_len(&shape, Transform::Forward, layer));
            }
        }
        for phase in 0..shape.phases as u8 {
            for layer in 0..split {
                let id = RegionId::Twiddle {
                    transform: Transform::Inverse,
                    layer,
                    phase: Some(phase),
                };
                push(&mut regions, id, region_len(&shape, Transform::Inverse, layer));
            }
        }
        for layer in split..layers {
            let id = RegionId::Twiddle {
                transform: Transform::Inverse,
                layer,
                phase: None,
            };
            push(&mut regions, id, region_len(&shape, Transform::Inverse, layer));
        }
        for mask in LaneMask::ALL {
            push(&mut regions, RegionId::Mask(mask), LaneMask::LEN);
        }

        let layout = Self {
            shape,
            regions,
            total_len: cursor,
        };
        layout.check_invariants()?;
        Ok(layout)
    }

    #[inline]
    pub fn shape(&self) -> &NttShape {
        &self.shape
    }

    /// All regions, in buffer order.
    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Total element count of the buffer the kernel must provide.
    #[inline]
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|region| region.id == id)
    }

    pub fn offset_of(&self, id: RegionId) -> Option<usize> {
        self.region(id).map(|region| region.offset)
    }

    fn check_invariants(&self) -> Result<(), LayoutError> {
        if let Some(first) = self.regions.first() {
            if first.offset != 0 {
                return Err(LayoutError::NonZeroStart {
                    region: first.id.to_string(),
                    found: first.offset,
                });
            }
        }

        for (prev, next) in self.regions.iter().tuple_windows() {
            if next.offset != prev.end() {
                return Err(LayoutError::Discontiguous {
                    region: next.id.to_string(),
                    expected: prev.end(),
                    found: next.offset,
                });
            }
        }

        let mut masks_seen = 0usize;
        let mut forward = 0usize;
        let mut inverse = 0usize;
        for region in &self.regions {
            match region.kind {
                RegionKind::Mask => {
                    masks_seen += 1;
                    if region.len != LaneMask::LEN {
                        return Err(LayoutError::MaskLength {
                            region: region.id.to_string(),
                            len: region.len,
                            expected: LaneMask::LEN,
                        });
                    }
                }
                RegionKind::ForwardTwiddle | RegionKind::InverseTwiddle => {
                    if masks_seen > 0 {
                        return Err(LayoutError::MaskNotTrailing {
                            region: region.id.to_string(),
                        });
                    }
                    if region.len % 2 != 0 {
                        return Err(LayoutError::OddTwiddleLength {
                            region: region.id.to_string(),
                            len: region.len,
                        });
                    }
                    match region.kind {
                        RegionKind::ForwardTwiddle => forward += 1,
                        RegionKind::InverseTwiddle => inverse += 1,
                        RegionKind::Mask => unreachable!(),
                    }
                }
            }
        }

        if masks_seen != LaneMask::ALL.len() {
            return Err(LayoutError::MaskCount {
                found: masks_seen,
                expected: LaneMask::ALL.len(),
            });
        }
        if forward != inverse {
            return Err(LayoutError::DirectionMismatch { forward, inverse });
        }

        let sum: usize = self.regions.iter().map(|region| region.len).sum();
        if sum != self.total_len {
            return Err(LayoutError::TotalSizeMismatch {
                expected: self.total_len,
                found: sum,
            });
        }

        Ok(())
    }
}
