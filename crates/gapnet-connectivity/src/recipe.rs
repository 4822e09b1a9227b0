// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Recipe handed to the simulation engine.

The engine drives a model through [`Recipe`]: it asks for the cell count,
then for each gid its kind, description, probes and gap junctions. All of
these are plain reads over data built once in [`NetworkRecipe::new`], so
the engine may query different gids from several threads.
*/

use serde::{Deserialize, Serialize};
use tracing::info;

use gapnet_config::{validate_config, GapNetConfig};

use crate::cell::{junction_label, CellDescription, CellTemplate};
use crate::connectivity::{Adjacency, ClusteredConnectivity};
use crate::junctions::{neighbors_of, neighbors_of_signed, GapJunctionStore, Neighbor};
use crate::rng::network_rng;
use crate::stats::NetworkStats;
use crate::types::{check_gid, CellGid, GapNetError, GapNetResult};

/// Integration step shared by both experiments (ms)
pub const DEFAULT_DT_MS: f64 = 0.025;

const NETWORK_TSTOP_MS: f64 = 2000.0;
const NETWORK_SAMPLE_INTERVAL_MS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Cable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProbeSpec {
    /// Membrane voltage sampled at a locset expression
    MembraneVoltage { locset: String },
    /// Membrane voltage of every control volume of the cell
    MembraneVoltageCell,
}

/// Properties shared by every cell of a kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalProperties {
    /// Mechanism catalogue to load alongside the defaults
    pub catalogue: String,
    /// Prefix prepended to the catalogue's mechanism names
    pub catalogue_prefix: String,
    pub junction_mechanism: Option<String>,
}

/// How long and how finely the engine should run the model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    pub tstop_ms: f64,
    pub dt_ms: f64,
    /// Interval of the regular probe sampling schedule
    pub sample_interval_ms: f64,
}

/// Gap junction terminating on the queried cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapJunctionConnection {
    pub peer_gid: CellGid,
    pub peer_label: String,
    pub local_label: String,
    pub weight: f64,
}

/// Queries the simulation engine makes while assembling a model
pub trait Recipe: Send + Sync {
    /// Engine-neutral description the adapter turns into a cable cell
    type Cell;

    fn num_cells(&self) -> u32;

    fn cell_kind(&self, gid: CellGid) -> GapNetResult<CellKind>;

    fn cell_description(&self, gid: CellGid) -> GapNetResult<Self::Cell>;

    fn probes(&self, gid: CellGid) -> GapNetResult<Vec<ProbeSpec>>;

    /// No gap junctions unless the model has some
    fn gap_junctions_on(&self, gid: CellGid) -> GapNetResult<Vec<GapJunctionConnection>> {
        check_gid(gid, self.num_cells())?;
        Ok(Vec::new())
    }

    fn global_properties(&self, kind: CellKind) -> GlobalProperties;

    fn run_settings(&self) -> RunSettings;
}

/// Clustered gap-junction network
#[derive(Debug, Clone)]
pub struct NetworkRecipe {
    ncells: u32,
    cluster_size: u32,
    weight: f64,
    catalogue: String,
    template: CellTemplate,
    adjacency: Adjacency,
    junctions: GapJunctionStore,
}

impl NetworkRecipe {
    /// Validate `config`, then generate connectivity and junction ports
    ///
    /// Validation happens before any random draw.
    pub fn new(config: &GapNetConfig) -> GapNetResult<Self> {
        validate_config(config).map_err(|e| GapNetError::InvalidConfig(e.to_string()))?;

        let network = &config.network;
        let generator =
            ClusteredConnectivity::new(network.ncells, network.cluster_coef, network.cluster_size)?;

        let mut rng = network_rng(network.seed);
        let adjacency = generator.generate(&mut rng)?;
        let junctions = GapJunctionStore::assign(&adjacency, network.dend_count, &mut rng)?;
        junctions.verify_against(&adjacency)?;

        let template = CellTemplate {
            seed: network.seed,
            dend_count: network.dend_count,
            junction_mechanism: config.gap_junctions.mechanism.clone(),
            jitter: config.cell.jitter,
            cm: config.cell.cm,
            axial_resistivity: config.cell.axial_resistivity,
        };

        let recipe = Self {
            ncells: network.ncells,
            cluster_size: network.cluster_size,
            weight: config.gap_junctions.weight,
            catalogue: config.cell.catalogue.clone(),
            template,
            adjacency,
            junctions,
        };

        let stats = recipe.stats();
        info!(
            ncells = stats.ncells,
            edges = stats.edge_count,
            mean_degree = stats.mean_degree,
            intra_density = stats.intra_cluster_density,
            inter_density = stats.inter_cluster_density,
            seed = network.seed,
            "Built gap junction network"
        );

        Ok(recipe)
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn junctions(&self) -> &GapJunctionStore {
        &self.junctions
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Directed junction triples of `gid`
    pub fn neighbors_of(&self, gid: CellGid) -> GapNetResult<Vec<Neighbor>> {
        neighbors_of(gid, self.ncells, &self.junctions)
    }

    /// [`Self::neighbors_of`] for signed indices
    pub fn neighbors_of_signed(&self, gid: i64) -> GapNetResult<Vec<Neighbor>> {
        neighbors_of_signed(gid, self.ncells, &self.junctions)
    }

    pub fn stats(&self) -> NetworkStats {
        NetworkStats::from_adjacency(&self.adjacency, self.cluster_size)
    }
}

impl Recipe for NetworkRecipe {
    type Cell = CellDescription;

    fn num_cells(&self) -> u32 {
        self.ncells
    }

    fn cell_kind(&self, gid: CellGid) -> GapNetResult<CellKind> {
        check_gid(gid, self.ncells)?;
        Ok(CellKind::Cable)
    }

    fn cell_description(&self, gid: CellGid) -> GapNetResult<CellDescription> {
        check_gid(gid, self.ncells)?;
        self.template.describe(gid)
    }

    fn probes(&self, gid: CellGid) -> GapNetResult<Vec<ProbeSpec>> {
        check_gid(gid, self.ncells)?;
        Ok(vec![ProbeSpec::MembraneVoltage {
            locset: "\"root\"".to_string(),
        }])
    }

    fn gap_junctions_on(&self, gid: CellGid) -> GapNetResult<Vec<GapJunctionConnection>> {
        let connections = self
            .neighbors_of(gid)?
            .into_iter()
            .map(|n| GapJunctionConnection {
                peer_gid: n.other,
                peer_label: junction_label(n.other_port),
                local_label: junction_label(n.local_port),
                weight: self.weight,
            })
            .collect();
        Ok(connections)
    }

    fn global_properties(&self, _kind: CellKind) -> GlobalProperties {
        GlobalProperties {
            catalogue: self.catalogue.clone(),
            catalogue_prefix: String::new(),
            junction_mechanism: Some(self.template.junction_mechanism.clone()),
        }
    }

    fn run_settings(&self) -> RunSettings {
        RunSettings {
            tstop_ms: NETWORK_TSTOP_MS,
            dt_ms: DEFAULT_DT_MS,
            sample_interval_ms: NETWORK_SAMPLE_INTERVAL_MS,
        }
    }
}
