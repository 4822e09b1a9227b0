// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for network construction and recipe queries.
*/

use serde::{Deserialize, Serialize};

/// Cell identifier, dense in `[0, ncells)`
pub type CellGid = u32;

/// Index of a junction site on a cell, in `[0, dend_count)`
pub type PortId = u32;

/// Result type for network operations
pub type GapNetResult<T> = Result<T, GapNetError>;

/// Errors that can occur while building or querying the network
#[derive(Debug, thiserror::Error)]
pub enum GapNetError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cell {gid} out of range: network has {ncells} cells")]
    OutOfRange { gid: i64, ncells: u32 },

    #[error("Configuration error: {0}")]
    Config(#[from] gapnet_config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Canonical key of an undirected edge: `low < high`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    pub low: CellGid,
    pub high: CellGid,
}

impl EdgeKey {
    /// Build the key for the edge between `a` and `b`, in either order
    ///
    /// Returns `None` for a self-loop.
    pub fn new(a: CellGid, b: CellGid) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The endpoint that is not `gid`, if `gid` is an endpoint
    pub fn other(&self, gid: CellGid) -> Option<CellGid> {
        if gid == self.low {
            Some(self.high)
        } else if gid == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

/// Attachment ports of one edge, in canonical `(low, high)` order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortPair {
    pub low_port: PortId,
    pub high_port: PortId,
}

impl PortPair {
    /// Ports as `(local, other)` seen from `gid`, one of the key's endpoints
    pub fn oriented(&self, key: &EdgeKey, gid: CellGid) -> (PortId, PortId) {
        if gid == key.high {
            (self.high_port, self.low_port)
        } else {
            (self.low_port, self.high_port)
        }
    }
}

/// Check a gid against the network size
pub fn check_gid(gid: CellGid, ncells: u32) -> GapNetResult<()> {
    if gid < ncells {
        Ok(())
    } else {
        Err(GapNetError::OutOfRange {
            gid: i64::from(gid),
            ncells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key_is_order_independent() {
        assert_eq!(EdgeKey::new(3, 7), EdgeKey::new(7, 3));
        assert_eq!(EdgeKey::new(3, 7).unwrap(), EdgeKey { low: 3, high: 7 });
        assert!(EdgeKey::new(5, 5).is_none());
    }

    #[test]
    fn test_edge_key_other() {
        let key = EdgeKey::new(2, 9).unwrap();
        assert_eq!(key.other(2), Some(9));
        assert_eq!(key.other(9), Some(2));
        assert_eq!(key.other(4), None);
    }

    #[test]
    fn test_port_pair_orientation() {
        let key = EdgeKey::new(1, 4).unwrap();
        let ports = PortPair {
            low_port: 6,
            high_port: 2,
        };
        assert_eq!(ports.oriented(&key, 1), (6, 2));
        assert_eq!(ports.oriented(&key, 4), (2, 6));
    }

    #[test]
    fn test_config_errors_convert() {
        fn load() -> GapNetResult<()> {
            Err(gapnet_config::ConfigError::ParseError("bad".to_string()))?;
            Ok(())
        }
        assert!(matches!(load(), Err(GapNetError::Config(_))));
    }

    #[test]
    fn test_check_gid() {
        assert!(check_gid(0, 16).is_ok());
        assert!(check_gid(15, 16).is_ok());
        assert!(matches!(
            check_gid(16, 16),
            Err(GapNetError::OutOfRange { gid: 16, ncells: 16 })
        ));
    }
}
