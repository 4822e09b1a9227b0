// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # gapnet
//!
//! Builds gap-junction coupled networks of multi-compartment cells for a
//! cable-neuron simulation engine. Cells are wired by a clustered random
//! model whose `cluster_coef` slides between block-structured and uniform
//! connectivity; every undirected edge gets one junction port on each cell.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gapnet::prelude::*;
//!
//! let config = GapNetConfig::default();
//! let recipe = NetworkRecipe::new(&config)?;
//!
//! for gid in 0..recipe.num_cells() {
//!     for gj in recipe.gap_junctions_on(gid)? {
//!         println!("{} {} -> {} {}", gid, gj.local_label, gj.peer_gid, gj.peer_label);
//!     }
//! }
//! # Ok::<(), gapnet::connectivity::GapNetError>(())
//! ```
//!
//! ## Crates
//!
//! - [`config`]: TOML configuration with environment and CLI overrides
//! - [`observability`]: `tracing` setup and `--debug-<crate>` flags
//! - [`connectivity`]: generator, junction store, neighbour view, network and
//!   single-cell L5PC recipes

pub use gapnet_config as config;
pub use gapnet_connectivity as connectivity;
pub use gapnet_observability as observability;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commonly used types
pub mod prelude {
    pub use gapnet_config::{load_config, validate_config, GapNetConfig};
    pub use gapnet_connectivity::{
        GapJunctionConnection, GapNetError, GapNetResult, L5pcRecipe, Neighbor,
        NetworkRecipe, NetworkStats, Recipe, RunSettings,
    };
}
