// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use ndarray::Array2;

use crate::types::{CellGid, EdgeKey, GapNetError, GapNetResult};

/// Symmetric boolean adjacency with an empty diagonal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacency {
    matrix: Array2<bool>,
}

impl Adjacency {
    /// Wrap a boolean matrix, checking it is square, symmetric and loop-free
    pub fn from_matrix(matrix: Array2<bool>) -> GapNetResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(GapNetError::Internal(format!(
                "adjacency must be square, got {}x{}",
                rows, cols
            )));
        }
        for i in 0..rows {
            if matrix[[i, i]] {
                return Err(GapNetError::Internal(format!("self-loop on cell {}", i)));
            }
            for j in (i + 1)..cols {
                if matrix[[i, j]] != matrix[[j, i]] {
                    return Err(GapNetError::Internal(format!(
                        "adjacency not symmetric at ({}, {})",
                        i, j
                    )));
                }
            }
        }
        Ok(Self { matrix })
    }

    /// Build from a list of undirected edges
    pub fn from_edges(ncells: u32, edges: &[(CellGid, CellGid)]) -> GapNetResult<Self> {
        let n = ncells as usize;
        let mut matrix = Array2::from_elem((n, n), false);
        for &(a, b) in edges {
            let key = EdgeKey::new(a, b)
                .ok_or_else(|| GapNetError::Internal(format!("self-loop on cell {}", a)))?;
            if key.high >= ncells {
                return Err(GapNetError::OutOfRange {
                    gid: i64::from(key.high),
                    ncells,
                });
            }
            matrix[[key.low as usize, key.high as usize]] = true;
            matrix[[key.high as usize, key.low as usize]] = true;
        }
        Ok(Self { matrix })
    }

    pub fn ncells(&self) -> u32 {
        self.matrix.nrows() as u32
    }

    pub fn is_edge(&self, a: CellGid, b: CellGid) -> bool {
        self.matrix
            .get([a as usize, b as usize])
            .copied()
            .unwrap_or(false)
    }

    /// Undirected edges as canonical keys, in row-major order
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.matrix
            .indexed_iter()
            .filter(|&((i, j), &set)| set && i < j)
            .map(|((i, j), _)| EdgeKey {
                low: i as CellGid,
                high: j as CellGid,
            })
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Number of true entries; twice the edge count
    pub fn true_entries(&self) -> usize {
        self.matrix.iter().filter(|&&set| set).count()
    }

    pub fn degree(&self, gid: CellGid) -> usize {
        if gid >= self.ncells() {
            return 0;
        }
        self.matrix.row(gid as usize).iter().filter(|&&set| set).count()
    }

    pub fn as_array(&self) -> &Array2<bool> {
        &self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_edges() {
        let adj = Adjacency::from_edges(4, &[(0, 1), (3, 2)]).unwrap();
        assert!(adj.is_edge(1, 0));
        assert!(adj.is_edge(2, 3));
        assert!(!adj.is_edge(0, 2));
        assert_eq!(adj.edge_count(), 2);
        assert_eq!(adj.true_entries(), 4);
        assert_eq!(adj.degree(0), 1);
        assert_eq!(adj.degree(9), 0);
    }

    #[test]
    fn test_edges_are_canonical_and_ordered() {
        let adj = Adjacency::from_edges(4, &[(3, 1), (2, 0), (1, 0)]).unwrap();
        let edges: Vec<(u32, u32)> = adj.edges().map(|k| (k.low, k.high)).collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 3)]);
    }

    #[test]
    fn test_rejects_asymmetric() {
        let m = array![[false, true], [false, false]];
        assert!(Adjacency::from_matrix(m).is_err());
    }

    #[test]
    fn test_rejects_self_loop() {
        let m = array![[true, false], [false, false]];
        assert!(Adjacency::from_matrix(m).is_err());
        assert!(Adjacency::from_edges(3, &[(1, 1)]).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_edge() {
        assert!(matches!(
            Adjacency::from_edges(3, &[(0, 3)]),
            Err(GapNetError::OutOfRange { gid: 3, ncells: 3 })
        ));
    }
}
