//! Structural parameters of the vectorized transform.
//!
//! The lane count lives here exactly once: the layout engine and the
//! consuming kernel must both read [`NttShape::DILITHIUM`], never a private
//! copy of the vector width.

use serde::Serialize;

use crate::error::ShapeError;
use crate::field_element::FieldElement;
use crate::traits::PrimitiveRootOfUnity;

/// Dilithium prime modulus (alias to the single source of truth).
pub const Q: i32 = FieldElement::P as i32;

/// Polynomial degree used across Dilithium (a power of two for NTTs).
pub const N: usize = 256;

/// Base root of unity of order 2N fixed by the kernel's twiddle contract.
pub const ZETA: u32 = 1753;

/// Structural parameters of one transform instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NttShape {
    /// Number of polynomial coefficients.
    pub degree: usize,
    /// Number of butterfly layers; `2^layers == degree`.
    pub layers: u32,
    /// Field elements processed per vector instruction.
    pub lanes: usize,
    /// Interleaved phases for layers processed register-resident.
    pub phases: usize,
}

impl NttShape {
    /// The shape consumed by the Dilithium vector kernel.
    pub const DILITHIUM: Self = Self::from_values(N, 8, 4, 4);

    /// Create a shape from literal values (const-friendly).
    ///
    /// No validation happens here; [`NttShape::validate`] is run by the
    /// layout generator before any region is laid out.
    pub const fn from_values(
        degree: usize,
        layers: u32,
        lanes: usize,
        phases: usize,
    ) -> Self {
        Self {
            degree,
            layers,
            lanes,
            phases,
        }
    }

    /// First layer of the register-resident pass.
    ///
    /// Layers below the boundary walk the whole coefficient array with
    /// strided accesses; layers at or above it run per phase block.
    #[inline]
    pub const fn split_boundary(&self) -> u32 {
        self.layers / 2
    }

    /// Coefficients covered by one phase.
    #[inline]
    pub const fn phase_block(&self) -> usize {
        self.degree / self.phases
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        if !self.degree.is_power_of_two() || self.degree < 4 {
            return Err(ShapeError::DegreeNotPowerOfTwo(self.degree));
        }
        if 1usize << self.layers != self.degree {
            return Err(ShapeError::LayerCountMismatch {
                layers: self.layers,
                degree: self.degree,
            });
        }
        if !self.lanes.is_power_of_two() || self.lanes < 2 {
            return Err(ShapeError::InvalidLaneCount(self.lanes));
        }
        if !self.phases.is_power_of_two() {
            return Err(ShapeError::InvalidPhaseCount(self.phases));
        }
        let first_split_blocks = 1usize << self.split_boundary();
        if self.phases > first_split_blocks {
            return Err(ShapeError::TooManyPhases {
                phases: self.phases,
                blocks: first_split_blocks,
            });
        }
        if self.phase_block() < self.lanes {
            return Err(ShapeError::PhaseBlockTooNarrow {
                block: self.phase_block(),
                lanes: self.lanes,
            });
        }
        let root_order = 2 * self.degree as u32;
        if FieldElement::primitive_root_of_unity(root_order).is_none() {
            return Err(ShapeError::MissingPrimitiveRoot(root_order));
        }
        Ok(())
    }
}

impl Default for NttShape {
    fn default() -> Self {
        Self::DILITHIUM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dilithium_shape_is_valid() {
        assert!(NttShape::DILITHIUM.validate().is_ok());
        assert_eq!(NttShape::default(), NttShape::DILITHIUM);
        assert_eq!(4, NttShape::DILITHIUM.split_boundary());
        assert_eq!(64, NttShape::DILITHIUM.phase_block());
    }

    #[test]
    fn degree_must_be_a_power_of_two() {
        let shape = NttShape::from_values(100, 8, 4, 4);
        assert_eq!(
            Err(ShapeError::DegreeNotPowerOfTwo(100)),
            shape.validate()
        );
    }

    #[test]
    fn layer_count_must_match_degree() {
        let shape = NttShape::from_values(256, 7, 4, 4);
        assert_eq!(
            Err(ShapeError::LayerCountMismatch {
                layers: 7,
                degree: 256
            }),
            shape.validate()
        );
    }

    #[test]
    fn lane_and_phase_counts_must_be_powers_of_two() {
        let shape = NttShape::from_values(256, 8, 3, 4);
        assert_eq!(Err(ShapeError::InvalidLaneCount(3)), shape.validate());

        let shape = NttShape::from_values(256, 8, 4, 3);
        assert_eq!(Err(ShapeError::InvalidPhaseCount(3)), shape.validate());
    }

    #[test]
    fn phases_cannot_outnumber_first_split_layer_blocks() {
        let shape = NttShape::from_values(256, 8, 4, 32);
        assert_eq!(
            Err(ShapeError::TooManyPhases {
                phases: 32,
                blocks: 16
            }),
            shape.validate()
        );
    }

    #[test]
    fn phase_block_must_cover_a_vector() {
        let shape = NttShape::from_values(64, 6, 32, 4);
        assert_eq!(
            Err(ShapeError::PhaseBlockTooNarrow {
                block: 16,
                lanes: 32
            }),
            shape.validate()
        );
    }

    #[test]
    fn degrees_without_a_tabulated_root_are_rejected() {
        let shape = NttShape::from_values(512, 9, 4, 4);
        assert_eq!(
            Err(ShapeError::MissingPrimitiveRoot(1024)),
            shape.validate()
        );
    }
}
