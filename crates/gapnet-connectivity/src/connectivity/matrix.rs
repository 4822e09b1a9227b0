// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Dense matrix helpers used by the connectivity generator.
*/

use ndarray::{s, Array2, ArrayView2};
use rand::Rng;

/// Block-diagonal 0/1 mask with `cluster_size` square blocks of ones
///
/// The last block is truncated when `ncells` is not a multiple of
/// `cluster_size`. A `cluster_size` of 0 yields an all-zero mask.
pub fn cluster_mask(ncells: usize, cluster_size: usize) -> Array2<f64> {
    let mut mask = Array2::<f64>::zeros((ncells, ncells));
    if cluster_size == 0 {
        return mask;
    }
    for start in (0..ncells).step_by(cluster_size) {
        let end = (start + cluster_size).min(ncells);
        mask.slice_mut(s![start..end, start..end]).fill(1.0);
    }
    mask
}

/// Square matrix of independent uniform `[0, 1)` draws, drawn row-major
pub fn uniform_matrix<R: Rng + ?Sized>(ncells: usize, rng: &mut R) -> Array2<f64> {
    Array2::from_shape_fn((ncells, ncells), |_| rng.gen::<f64>())
}

/// `(m + m^T) / 2`
pub fn symmetrize(m: ArrayView2<f64>) -> Array2<f64> {
    (&m + &m.t()) / 2.0
}

/// Scale so all entries sum to 1; an all-zero matrix is left unchanged
pub fn normalize_sum(mut m: Array2<f64>) -> Array2<f64> {
    let total = m.sum();
    if total > 0.0 {
        m /= total;
    }
    m
}

/// Value at zero-based `rank` of the entries sorted in descending order
///
/// Exactly `rank` entries are strictly greater than the result when there
/// are no ties at the boundary. Returns `None` if `rank` is past the end.
pub fn value_at_descending_rank(m: ArrayView2<f64>, rank: usize) -> Option<f64> {
    let mut values: Vec<f64> = m.iter().copied().collect();
    if rank >= values.len() {
        return None;
    }
    let (_, nth, _) = values.select_nth_unstable_by(rank, |a, b| b.total_cmp(a));
    Some(*nth)
}

/// Entries strictly greater than `threshold`
pub fn above(m: ArrayView2<f64>, threshold: f64) -> Array2<bool> {
    m.mapv(|v| v > threshold)
}
