// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Summary statistics of a generated network.

use serde::{Deserialize, Serialize};

use crate::connectivity::Adjacency;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub ncells: u32,
    pub edge_count: usize,
    pub min_degree: usize,
    pub max_degree: usize,
    pub mean_degree: f64,
    /// Edges over possible pairs inside a cluster block
    pub intra_cluster_density: f64,
    /// Edges over possible pairs across cluster blocks
    pub inter_cluster_density: f64,
}

impl NetworkStats {
    pub fn from_adjacency(adjacency: &Adjacency, cluster_size: u32) -> Self {
        let ncells = adjacency.ncells();
        let degrees: Vec<usize> = (0..ncells).map(|gid| adjacency.degree(gid)).collect();

        let cluster_of = |gid: u32| gid / cluster_size.max(1);

        let mut intra_edges = 0usize;
        let mut inter_edges = 0usize;
        for key in adjacency.edges() {
            if cluster_of(key.low) == cluster_of(key.high) {
                intra_edges += 1;
            } else {
                inter_edges += 1;
            }
        }

        let mut intra_pairs = 0usize;
        let mut inter_pairs = 0usize;
        for a in 0..ncells {
            for b in (a + 1)..ncells {
                if cluster_of(a) == cluster_of(b) {
                    intra_pairs += 1;
                } else {
                    inter_pairs += 1;
                }
            }
        }

        let ratio = |edges: usize, pairs: usize| {
            if pairs == 0 {
                0.0
            } else {
                edges as f64 / pairs as f64
            }
        };

        let edge_count = intra_edges + inter_edges;
        Self {
            ncells,
            edge_count,
            min_degree: degrees.iter().copied().min().unwrap_or(0),
            max_degree: degrees.iter().copied().max().unwrap_or(0),
            mean_degree: if ncells == 0 {
                0.0
            } else {
                2.0 * edge_count as f64 / f64::from(ncells)
            },
            intra_cluster_density: ratio(intra_edges, intra_pairs),
            inter_cluster_density: ratio(inter_edges, inter_pairs),
        }
    }
}
