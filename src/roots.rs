//! Twiddle factor generation for the constant table.
//!
//! Zetas are powers of the order-2N root fixed by the kernel contract,
//! indexed negacyclically in bit-reversed block order. Each zeta is stored
//! as its signed representative together with a precomputed reduction
//! helper consumed by the kernel's modular-multiply routine; the pair order
//! (value, then helper) is part of the kernel interface.

use crate::error::ShapeError;
use crate::field_element::FieldElement;
use crate::layout::{butterfly_distance, replication, Transform};
use crate::params::NttShape;
use crate::traits::{ModPowU32, PrimitiveRootOfUnity};

/// One twiddle slot before replication: the signed root and its paired
/// reduction helper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZetaPair {
    pub value: i32,
    pub twisted: i32,
}

#[inline]
pub(crate) const fn bitrev(mut n: usize, bits: u32) -> usize {
    let mut r = 0;
    let mut i = 0;
    while i < bits {
        r = (r << 1) | (n & 1);
        n >>= 1;
        i += 1;
    }
    r
}

/// Exponent of the base root for a given layer and block.
///
/// The negacyclic twist offsets the block index by the layer's group count
/// and reverses one extra bit; inverse twiddles use the negated exponent.
fn root_exponent(
    shape: &NttShape,
    transform: Transform,
    layer: u8,
    block: usize,
) -> usize {
    let forward_layer = match transform {
        Transform::Forward => layer as u32,
        Transform::Inverse => shape.layers - 1 - layer as u32,
    };
    let twisted_layer = forward_layer + 1;
    let block = block + (1usize << forward_layer);
    let size_remaining = shape.degree >> twisted_layer;
    let exponent = size_remaining * bitrev(block, twisted_layer);
    match transform {
        Transform::Forward => exponent,
        Transform::Inverse => {
            let order = 2 * shape.degree;
            (order - exponent) % order
        }
    }
}

/// Signed representative plus reduction helper for a canonical root.
///
/// The helper is `round_to_even(value * 2^32 / q) / 2`, computed in exact
/// integer arithmetic. Ties cannot occur: `value * 2^32` is even while any
/// odd multiple of q is odd.
fn prepare_root(root: u32) -> ZetaPair {
    let q = FieldElement::P as i128;
    let mut value = root as i128;
    if value > q / 2 {
        value -= q;
    }

    let scaled = value << 32;
    let mut nearest = (2 * scaled + q).div_euclid(2 * q);
    if nearest % 2 != 0 {
        if nearest * q <= scaled {
            nearest += 1;
        } else {
            nearest -= 1;
        }
    }

    ZetaPair {
        value: value as i32,
        twisted: (nearest / 2) as i32,
    }
}

/// The twiddle slot for one (transform, layer, block) triple.
pub fn zeta_for_block(
    shape: &NttShape,
    transform: Transform,
    layer: u8,
    block: usize,
) -> Result<ZetaPair, ShapeError> {
    let order = 2 * shape.degree as u32;
    let base = FieldElement::primitive_root_of_unity(order)
        .ok_or(ShapeError::MissingPrimitiveRoot(order))?;
    let exponent = root_exponent(shape, transform, layer, block) as u32;
    Ok(prepare_root(base.mod_pow_u32(exponent).value()))
}

/// All elements of one twiddle region, in buffer order.
///
/// Blocks run in ascending order; each zeta contributes its value repeated
/// once per butterfly that shares it inside a vector register, followed by
/// its helper repeated the same way, so the result length always equals the
/// layout's region length.
pub(crate) fn region_twiddles(
    shape: &NttShape,
    transform: Transform,
    layer: u8,
    phase: Option<u8>,
) -> Result<Vec<i32>, ShapeError> {
    let distance = butterfly_distance(shape, transform, layer);
    let total_blocks = shape.degree / (2 * distance);
    let (start, count) = match phase {
        Some(phase) => {
            let per_phase = total_blocks / shape.phases;
            (phase as usize * per_phase, per_phase)
        }
        None => (0, total_blocks),
    };

    let rep = replication(shape, distance);
    let mut out = Vec::with_capacity(count * 2 * rep);
    for block in start..start + count {
        let zeta = zeta_for_block(shape, transform, layer, block)?;
        out.extend(std::iter::repeat(zeta.value).take(rep));
        out.extend(std::iter::repeat(zeta.twisted).take(rep));
    }
    Ok(out)
}
