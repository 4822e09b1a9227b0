// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# gapnet connectivity

Builds a gap-junction coupled cell network for an external cable-neuron
simulation engine:
- Clustered random connectivity (tunable from block-structured to random)
- Junction port assignment, stored once per undirected edge
- Per-cell neighbour queries in the caller's orientation
- A [`Recipe`] implementation the engine adapter consumes
- A single-cell L5PC current clamp recipe ([`L5pcRecipe`])

Everything random is drawn from a seed in the configuration, so a network is
a pure function of its [`gapnet_config::GapNetConfig`].

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cell;
pub mod connectivity;
pub mod junctions;
pub mod l5pc;
pub mod recipe;
mod rng;
pub mod stats;
pub mod types;

pub use cell::{junction_label, CellDescription, CellTemplate};
pub use connectivity::{generate, Adjacency, ClusteredConnectivity};
pub use junctions::{neighbors_of, neighbors_of_signed, GapJunctionStore, Neighbor};
pub use l5pc::{
    ClampPlacement, CurrentClamp, CvPolicy, Figure, L5pcCellDescription, L5pcRecipe,
    MorphologySource,
};
pub use recipe::{
    CellKind, GapJunctionConnection, GlobalProperties, NetworkRecipe, ProbeSpec, Recipe,
    RunSettings, DEFAULT_DT_MS,
};
pub use rng::{network_rng, GapNetRng};
pub use stats::NetworkStats;
pub use types::{CellGid, EdgeKey, GapNetError, GapNetResult, PortId, PortPair};
