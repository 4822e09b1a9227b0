// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Clustered random connectivity.

Two independent symmetric affinity matrices are mixed: one restricted to
diagonal blocks of `cluster_size` cells, one unconstrained. The
`cluster_coef` weight moves the network from purely clustered (1.0) to
purely random (0.0). Edges are then chosen by rank, so the edge count
depends only on `ncells`:

```text
intra = normalize(sym(U1 * mask))
rand  = normalize(sym(U2))
P     = coef * intra + (1 - coef) * rand,  diag(P) = 0
A     = P > value_at_rank(P, min(10 n, n (n - 1)))
```
*/

use ndarray::Array2;
use rand::Rng;
use tracing::debug;

use super::adjacency::Adjacency;
use super::matrix::{
    above, cluster_mask, normalize_sum, symmetrize, uniform_matrix, value_at_descending_rank,
};
use crate::types::{GapNetError, GapNetResult};

/// Target number of true adjacency entries per cell
pub const ENTRIES_PER_CELL: usize = 10;

/// Parameters of the clustered generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusteredConnectivity {
    ncells: u32,
    cluster_coef: f64,
    cluster_size: u32,
}

impl ClusteredConnectivity {
    /// Validate parameters; nothing is drawn here
    pub fn new(ncells: u32, cluster_coef: f64, cluster_size: u32) -> GapNetResult<Self> {
        if ncells == 0 {
            return Err(GapNetError::InvalidConfig(
                "ncells must be greater than 0".to_string(),
            ));
        }
        if cluster_size == 0 {
            return Err(GapNetError::InvalidConfig(
                "cluster_size must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&cluster_coef) {
            return Err(GapNetError::InvalidConfig(format!(
                "cluster_coef must be between 0.0 and 1.0, got {}",
                cluster_coef
            )));
        }
        Ok(Self {
            ncells,
            cluster_coef,
            cluster_size,
        })
    }

    pub fn ncells(&self) -> u32 {
        self.ncells
    }

    pub fn cluster_coef(&self) -> f64 {
        self.cluster_coef
    }

    pub fn cluster_size(&self) -> u32 {
        self.cluster_size
    }

    /// Threshold rank: `min(10 n, n (n - 1))`
    ///
    /// Capped at the number of off-diagonal entries so the rank always falls
    /// inside the flattened matrix and zero-affinity entries never pass.
    pub fn target_entries(&self) -> usize {
        let n = self.ncells as usize;
        (ENTRIES_PER_CELL * n).min(n * (n - 1))
    }

    /// Mixed affinity matrix `P` (symmetric, zero diagonal)
    ///
    /// Draws the clustered matrix first, then the background matrix.
    pub fn affinity<R: Rng + ?Sized>(&self, rng: &mut R) -> Array2<f64> {
        let n = self.ncells as usize;
        let mask = cluster_mask(n, self.cluster_size as usize);

        let clustered = uniform_matrix(n, rng) * &mask;
        let intra = normalize_sum(symmetrize(clustered.view()));

        let background = uniform_matrix(n, rng);
        let random = normalize_sum(symmetrize(background.view()));

        let mut p = intra * self.cluster_coef + random * (1.0 - self.cluster_coef);
        p.diag_mut().fill(0.0);
        p
    }

    /// Draw a boolean adjacency
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> GapNetResult<Adjacency> {
        let p = self.affinity(rng);
        let rank = self.target_entries();
        let threshold = value_at_descending_rank(p.view(), rank).ok_or_else(|| {
            GapNetError::Internal(format!(
                "threshold rank {} outside {} affinity entries",
                rank,
                p.len()
            ))
        })?;

        let adjacency = Adjacency::from_matrix(above(p.view(), threshold))?;
        debug!(
            ncells = self.ncells,
            cluster_coef = self.cluster_coef,
            cluster_size = self.cluster_size,
            threshold,
            edges = adjacency.edge_count(),
            "Generated clustered connectivity"
        );
        Ok(adjacency)
    }
}

/// Draw a clustered adjacency in one call
pub fn generate<R: Rng + ?Sized>(
    ncells: u32,
    cluster_coef: f64,
    cluster_size: u32,
    rng: &mut R,
) -> GapNetResult<Adjacency> {
    ClusteredConnectivity::new(ncells, cluster_coef, cluster_size)?.generate(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::network_rng;

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(ClusteredConnectivity::new(0, 0.5, 4).is_err());
        assert!(ClusteredConnectivity::new(16, 0.5, 0).is_err());
        assert!(ClusteredConnectivity::new(16, -0.01, 4).is_err());
        assert!(ClusteredConnectivity::new(16, 1.01, 4).is_err());
        assert!(ClusteredConnectivity::new(16, f64::NAN, 4).is_err());
    }

    #[test]
    fn test_target_entries() {
        let big = ClusteredConnectivity::new(16, 0.8, 4).unwrap();
        assert_eq!(big.target_entries(), 160);

        let small = ClusteredConnectivity::new(6, 0.8, 4).unwrap();
        assert_eq!(small.target_entries(), 30);

        let single = ClusteredConnectivity::new(1, 0.8, 4).unwrap();
        assert_eq!(single.target_entries(), 0);
    }

    #[test]
    fn test_affinity_is_symmetric_with_zero_diagonal() {
        let gen = ClusteredConnectivity::new(12, 0.6, 5).unwrap();
        let p = gen.affinity(&mut network_rng(1));
        for i in 0..12 {
            assert_eq!(p[[i, i]], 0.0);
            for j in 0..12 {
                assert_eq!(p[[i, j]], p[[j, i]]);
            }
        }
    }

    #[test]
    fn test_generate_edge_count() {
        let adj = generate(16, 0.8, 4, &mut network_rng(0)).unwrap();
        assert_eq!(adj.true_entries(), 160);
        assert_eq!(adj.edge_count(), 80);
    }

    #[test]
    fn test_small_network_is_fully_connected() {
        // n (n - 1) < 10 n: every positive off-diagonal pair becomes an edge
        let adj = generate(5, 0.5, 2, &mut network_rng(9)).unwrap();
        assert_eq!(adj.edge_count(), 10);
    }

    #[test]
    fn test_pure_clustering_keeps_edges_inside_blocks() {
        // 48 intra-block pairs for 16 cells in blocks of 4, fewer than the
        // target, so the threshold lands on zero affinity
        let adj = generate(16, 1.0, 4, &mut network_rng(5)).unwrap();
        for key in adj.edges() {
            assert_eq!(key.low / 4, key.high / 4, "edge {:?} crosses a block", key);
        }
        assert_eq!(adj.edge_count(), 24);
    }

    #[test]
    fn test_single_cell_has_no_edges() {
        let adj = generate(1, 0.8, 4, &mut network_rng(0)).unwrap();
        assert_eq!(adj.edge_count(), 0);
    }
}
