use thiserror::Error;

pub mod shape {
    use thiserror::Error;

    /// Errors raised while validating the structural transform parameters.
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[non_exhaustive]
    pub enum Error {
        #[error("degree {0} is not a power of two")]
        DegreeNotPowerOfTwo(usize),
        #[error("layer count {layers} does not match degree {degree} (need 2^layers == degree)")]
        LayerCountMismatch { layers: u32, degree: usize },
        #[error("lane count {0} must be a power of two and at least 2")]
        InvalidLaneCount(usize),
        #[error("phase count {0} must be a power of two and at least 1")]
        InvalidPhaseCount(usize),
        #[error("phase count {phases} exceeds the {blocks} blocks of the first split layer")]
        TooManyPhases { phases: usize, blocks: usize },
        #[error("phase block of {block} coefficients is narrower than the {lanes}-lane vector")]
        PhaseBlockTooNarrow { block: usize, lanes: usize },
        #[error("missing primitive root of unity of order {0}")]
        MissingPrimitiveRoot(u32),
    }
}

pub mod layout {
    use thiserror::Error;

    /// Invariant violations detected in a generated region map.
    ///
    /// Every variant names the offending region so a defective layout can be
    /// traced back to the size model or declaration order that produced it.
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[non_exhaustive]
    pub enum Error {
        #[error("first region {region} must start at offset 0, found {found}")]
        NonZeroStart { region: String, found: usize },
        #[error("region {region} starts at {found} but the previous region ends at {expected}")]
        Discontiguous {
            region: String,
            expected: usize,
            found: usize,
        },
        #[error("twiddle region {region} has odd length {len}")]
        OddTwiddleLength { region: String, len: usize },
        #[error("mask region {region} has length {len}, expected {expected}")]
        MaskLength {
            region: String,
            len: usize,
            expected: usize,
        },
        #[error("twiddle region {region} is declared after a mask region")]
        MaskNotTrailing { region: String },
        #[error("found {found} mask regions, expected {expected}")]
        MaskCount { found: usize, expected: usize },
        #[error(
            "forward/inverse region count mismatch: {forward} forward vs {inverse} inverse"
        )]
        DirectionMismatch { forward: usize, inverse: usize },
        #[error("region lengths sum to {found} but the layout claims {expected}")]
        TotalSizeMismatch { expected: usize, found: usize },
        #[error("region {region} was filled with {found} elements, expected {expected}")]
        FillMismatch {
            region: String,
            expected: usize,
            found: usize,
        },
    }
}

pub use layout::Error as LayoutError;
pub use shape::Error as ShapeError;

/// Common result type used across this crate.
pub type Result<T, E = TableError> = core::result::Result<T, E>;

/// Top-level error type to keep error management simple for users.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum TableError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
