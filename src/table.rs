//! The assembled constant table: a validated layout plus the flat buffer
//! it describes.

use crate::error::{LayoutError, Result};
use crate::layout::{Region, RegionId, TableLayout};
use crate::params::NttShape;
use crate::roots;

/// Immutable constant table for one transform shape.
///
/// Generated once ahead of any transform execution by a pure function of
/// the structural parameters, then handed to the kernel by reference; the
/// buffer is never mutated afterwards and can be read from any number of
/// threads without synchronization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstTable {
    layout: TableLayout,
    data: Vec<i32>,
}

impl ConstTable {
    /// Lay out, fill and cross-check the table for `shape`.
    ///
    /// Fails rather than returning a partially filled buffer: every region
    /// must be produced with exactly the length the layout assigned to it.
    pub fn generate(shape: NttShape) -> Result<Self> {
        let layout = TableLayout::generate(shape)?;

        let mut data = Vec::with_capacity(layout.total_len());
        for region in layout.regions() {
            let values = match region.id {
                RegionId::Twiddle {
                    transform,
                    layer,
                    phase,
                } => roots::region_twiddles(
                    layout.shape(),
                    transform,
                    layer,
                    phase,
                )?,
                RegionId::Mask(mask) => mask.pattern().to_vec(),
            };
            if values.len() != region.len {
                return Err(LayoutError::FillMismatch {
                    region: region.id.to_string(),
                    expected: region.len,
                    found: values.len(),
                }
                .into());
            }
            data.extend_from_slice(&values);
        }

        if data.len() != layout.total_len() {
            return Err(LayoutError::TotalSizeMismatch {
                expected: layout.total_len(),
                found: data.len(),
            }
            .into());
        }

        Ok(Self { layout, data })
    }

    #[inline]
    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    /// The whole flat buffer, in element units.
    #[inline]
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    #[inline]
    pub fn total_len(&self) -> usize {
        self.layout.total_len()
    }

    /// The slice of the buffer covered by one region.
    pub fn region_data(&self, id: RegionId) -> Option<&[i32]> {
        self.region_slice(self.layout.region(id)?).into()
    }

    #[inline]
    fn region_slice(&self, region: &Region) -> &[i32] {
        &self.data[region.offset..region.end()]
    }
}
