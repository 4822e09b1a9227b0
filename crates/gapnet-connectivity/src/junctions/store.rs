// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Per-edge junction ports.

Each undirected edge stores its two ports exactly once, under the canonical
key `(low, high)`. Directed readers reorient the pair themselves.
*/

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use crate::connectivity::Adjacency;
use crate::types::{CellGid, EdgeKey, GapNetError, GapNetResult, PortId, PortPair};

/// Junction ports for every edge of a network
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GapJunctionStore {
    ports: BTreeMap<EdgeKey, PortPair>,
}

impl GapJunctionStore {
    /// Draw ports for every edge of `adjacency`
    ///
    /// Edges are visited in row-major order of the upper triangle; for each
    /// edge the low endpoint's port is drawn before the high endpoint's.
    pub fn assign<R: Rng + ?Sized>(
        adjacency: &Adjacency,
        dend_count: u32,
        rng: &mut R,
    ) -> GapNetResult<Self> {
        if dend_count == 0 {
            return Err(GapNetError::InvalidConfig(
                "dend_count must be greater than 0".to_string(),
            ));
        }

        let mut store = Self::default();
        for key in adjacency.edges() {
            let low_port: PortId = rng.gen_range(0..dend_count);
            let high_port: PortId = rng.gen_range(0..dend_count);
            store.insert(
                key,
                PortPair {
                    low_port,
                    high_port,
                },
            )?;
        }

        debug!(edges = store.len(), dend_count, "Assigned junction ports");
        Ok(store)
    }

    fn insert(&mut self, key: EdgeKey, ports: PortPair) -> GapNetResult<()> {
        if self.ports.insert(key, ports).is_some() {
            return Err(GapNetError::Internal(format!(
                "ports for edge ({}, {}) assigned twice",
                key.low, key.high
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Ports of the edge between `a` and `b` as `(port on a, port on b)`
    pub fn get(&self, a: CellGid, b: CellGid) -> Option<(PortId, PortId)> {
        let key = EdgeKey::new(a, b)?;
        self.ports.get(&key).map(|ports| ports.oriented(&key, a))
    }

    /// Canonical entry for `key`
    pub fn get_canonical(&self, key: &EdgeKey) -> Option<&PortPair> {
        self.ports.get(key)
    }

    pub fn contains(&self, a: CellGid, b: CellGid) -> bool {
        EdgeKey::new(a, b).map_or(false, |key| self.ports.contains_key(&key))
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&EdgeKey, &PortPair)> {
        self.ports.iter()
    }

    pub fn degree(&self, gid: CellGid) -> usize {
        self.ports
            .keys()
            .filter(|key| key.low == gid || key.high == gid)
            .count()
    }

    /// Check that the store covers exactly the edges of `adjacency`
    pub fn verify_against(&self, adjacency: &Adjacency) -> GapNetResult<()> {
        let mut expected = 0usize;
        for key in adjacency.edges() {
            if !self.ports.contains_key(&key) {
                return Err(GapNetError::Internal(format!(
                    "edge ({}, {}) has no junction ports",
                    key.low, key.high
                )));
            }
            expected += 1;
        }
        if expected != self.ports.len() {
            return Err(GapNetError::Internal(format!(
                "{} junction entries for {} edges",
                self.ports.len(),
                expected
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::network_rng;

    fn triangle() -> Adjacency {
        Adjacency::from_edges(4, &[(0, 1), (1, 2), (0, 2)]).unwrap()
    }

    #[test]
    fn test_one_entry_per_edge() {
        let store = GapJunctionStore::assign(&triangle(), 10, &mut network_rng(0)).unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.contains(2, 1));
        assert!(!store.contains(0, 3));
        assert!(store.verify_against(&triangle()).is_ok());
    }

    #[test]
    fn test_ports_in_range() {
        let store = GapJunctionStore::assign(&triangle(), 3, &mut network_rng(4)).unwrap();
        for (_, ports) in store.iter() {
            assert!(ports.low_port < 3);
            assert!(ports.high_port < 3);
        }
    }

    #[test]
    fn test_get_is_oriented() {
        let store = GapJunctionStore::assign(&triangle(), 10, &mut network_rng(2)).unwrap();
        let canonical = *store.get_canonical(&EdgeKey::new(0, 2).unwrap()).unwrap();
        assert_eq!(
            store.get(0, 2),
            Some((canonical.low_port, canonical.high_port))
        );
        assert_eq!(
            store.get(2, 0),
            Some((canonical.high_port, canonical.low_port))
        );
        assert_eq!(store.get(1, 1), None);
    }

    #[test]
    fn test_degree() {
        let store = GapJunctionStore::assign(&triangle(), 10, &mut network_rng(0)).unwrap();
        assert_eq!(store.degree(0), 2);
        assert_eq!(store.degree(3), 0);
    }

    #[test]
    fn test_single_dendrite_uses_port_zero() {
        let store = GapJunctionStore::assign(&triangle(), 1, &mut network_rng(8)).unwrap();
        assert!(store
            .iter()
            .all(|(_, p)| p.low_port == 0 && p.high_port == 0));
    }

    #[test]
    fn test_zero_dendrites_rejected() {
        assert!(matches!(
            GapJunctionStore::assign(&triangle(), 0, &mut network_rng(0)),
            Err(GapNetError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_verify_detects_missing_edge() {
        let store = GapJunctionStore::assign(&triangle(), 10, &mut network_rng(0)).unwrap();
        let bigger = Adjacency::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]).unwrap();
        assert!(matches!(
            store.verify_against(&bigger),
            Err(GapNetError::Internal(_))
        ));

        let smaller = Adjacency::from_edges(4, &[(0, 1)]).unwrap();
        assert!(store.verify_against(&smaller).is_err());
    }

    #[test]
    fn test_duplicate_insert_is_internal_error() {
        let mut store = GapJunctionStore::default();
        let key = EdgeKey::new(0, 1).unwrap();
        let ports = PortPair {
            low_port: 0,
            high_port: 1,
        };
        store.insert(key, ports).unwrap();
        assert!(matches!(
            store.insert(key, ports),
            Err(GapNetError::Internal(_))
        ));
    }
}
