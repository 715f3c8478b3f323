pub use crate::fe;
pub use crate::{
    error::{Result, TableError},
    field_element::FieldElement,
    layout::{Region, RegionId, RegionKind, TableLayout, Transform},
    masks::LaneMask,
    params::NttShape,
    table::ConstTable,
};

/// Dilithium prime modulus (alias to the single source of truth).
pub const Q: i32 = crate::params::Q;
pub const N: usize = crate::params::N;
