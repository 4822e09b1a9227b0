// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use super::store::GapJunctionStore;
use crate::types::{check_gid, CellGid, EdgeKey, GapNetError, GapNetResult, PortId};

/// One junction seen from a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub other: CellGid,
    pub local_port: PortId,
    pub other_port: PortId,
}

/// Junctions of `gid`, ordered by neighbour gid
///
/// Ports come back in the caller's orientation: `local_port` is always on
/// `gid`, whichever endpoint the store filed it under.
pub fn neighbors_of(
    gid: CellGid,
    ncells: u32,
    store: &GapJunctionStore,
) -> GapNetResult<Vec<Neighbor>> {
    check_gid(gid, ncells)?;

    let neighbors = (0..ncells)
        .filter_map(|other| {
            let key = EdgeKey::new(gid, other)?;
            let ports = store.get_canonical(&key)?;
            let (local_port, other_port) = ports.oriented(&key, gid);
            Some(Neighbor {
                other,
                local_port,
                other_port,
            })
        })
        .collect();

    Ok(neighbors)
}

/// [`neighbors_of`] for callers holding signed indices
///
/// Negative indices are rejected with the same range error as indices past
/// the end.
pub fn neighbors_of_signed(
    gid: i64,
    ncells: u32,
    store: &GapJunctionStore,
) -> GapNetResult<Vec<Neighbor>> {
    let gid = CellGid::try_from(gid).map_err(|_| GapNetError::OutOfRange { gid, ncells })?;
    neighbors_of(gid, ncells, store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::Adjacency;
    use crate::rng::network_rng;

    fn star_store() -> GapJunctionStore {
        let adj = Adjacency::from_edges(5, &[(2, 0), (2, 1), (2, 4)]).unwrap();
        GapJunctionStore::assign(&adj, 10, &mut network_rng(3)).unwrap()
    }

    #[test]
    fn test_neighbors_sorted_by_gid() {
        let store = star_store();
        let hub = neighbors_of(2, 5, &store).unwrap();
        let others: Vec<u32> = hub.iter().map(|n| n.other).collect();
        assert_eq!(others, vec![0, 1, 4]);

        let leaf = neighbors_of(4, 5, &store).unwrap();
        assert_eq!(leaf.len(), 1);
        assert!(neighbors_of(3, 5, &store).unwrap().is_empty());
    }

    #[test]
    fn test_neighbors_are_reciprocal() {
        let store = star_store();
        for gid in 0..5 {
            for n in neighbors_of(gid, 5, &store).unwrap() {
                let back = neighbors_of(n.other, 5, &store).unwrap();
                assert!(back.contains(&Neighbor {
                    other: gid,
                    local_port: n.other_port,
                    other_port: n.local_port,
                }));
            }
        }
    }

    #[test]
    fn test_higher_endpoint_sees_swapped_ports() {
        let store = star_store();
        let canonical = *store.get_canonical(&EdgeKey::new(2, 4).unwrap()).unwrap();
        let from_high = neighbors_of(4, 5, &store).unwrap()[0];
        assert_eq!(from_high.local_port, canonical.high_port);
        assert_eq!(from_high.other_port, canonical.low_port);
    }

    #[test]
    fn test_out_of_range() {
        let store = star_store();
        assert!(matches!(
            neighbors_of(5, 5, &store),
            Err(GapNetError::OutOfRange { gid: 5, ncells: 5 })
        ));
        assert!(matches!(
            neighbors_of_signed(-1, 5, &store),
            Err(GapNetError::OutOfRange { gid: -1, ncells: 5 })
        ));
        assert_eq!(neighbors_of_signed(2, 5, &store).unwrap().len(), 3);
    }
}
