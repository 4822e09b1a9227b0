// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `gapnet_configuration.toml`.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GapNetConfig {
    pub network: NetworkConfig,
    pub gap_junctions: GapJunctionConfig,
    pub cell: CellConfig,
    pub l5pc: L5pcConfig,
    pub logging: LoggingConfig,
}

/// Network generation parameters
///
/// Defaults reproduce the published 16-cell experiment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Seed for every random draw made while building the network
    pub seed: u64,
    pub ncells: u32,
    /// Blend between clustered (1.0) and unstructured (0.0) connectivity
    pub cluster_coef: f64,
    pub cluster_size: u32,
    /// Number of dendrites per cell, each ending in one junction site
    pub dend_count: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            ncells: 16,
            cluster_coef: 0.8,
            cluster_size: 4,
            dend_count: 10,
        }
    }
}

/// Gap junction coupling
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GapJunctionConfig {
    /// Coupling weight applied to every junction
    pub weight: f64,
    /// Mechanism placed on every junction site
    pub mechanism: String,
}

impl Default for GapJunctionConfig {
    fn default() -> Self {
        Self {
            weight: 0.005,
            mechanism: "cx36".to_string(),
        }
    }
}

/// Cell template settings handed to the engine adapter
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CellConfig {
    /// Mechanism catalogue the engine must load
    pub catalogue: String,
    /// Relative standard deviation of channel density jitter
    pub jitter: f64,
    /// Membrane capacitance (F/m^2)
    pub cm: f64,
    /// Axial resistivity (Ohm.cm)
    pub axial_resistivity: f64,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            catalogue: "io".to_string(),
            jitter: 0.2,
            cm: 0.01,
            axial_resistivity: 100.0,
        }
    }
}

/// Single layer 5 pyramidal cell under current clamp
///
/// Asset paths are passed through to the engine adapter unread.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct L5pcConfig {
    /// Clamp protocol: "4a", "4b" or "5a"
    pub figure: String,
    /// NeuroML file holding the morphology
    pub morphology_path: String,
    /// Morphology id inside the NeuroML file
    pub morphology_name: String,
    /// Arbor cable component (ACC) file with the decor
    pub decor_path: String,
    pub catalogue: String,
    /// Prefix given to the catalogue's mechanism names
    pub catalogue_prefix: String,
    /// Maximum control volume extent (um)
    pub cv_max_extent: f64,
}

impl Default for L5pcConfig {
    fn default() -> Self {
        Self {
            figure: "5a".to_string(),
            morphology_path: "l5pc.nml".to_string(),
            morphology_name: "morphology_L5PC".to_string(),
            decor_path: "l5pc.acc".to_string(),
            catalogue: "l5pc".to_string(),
            catalogue_prefix: "local_".to_string(),
            cv_max_extent: 100.0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for log files (used when file logging is compiled in)
    pub log_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: "./logs".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GapNetConfig = toml::from_str("[network]\nncells = 32\n").unwrap();
        assert_eq!(config.network.ncells, 32);
        assert_eq!(config.network.cluster_size, 4);
        assert_eq!(config.gap_junctions.weight, 0.005);
        assert_eq!(config.cell.catalogue, "io");
    }

    #[test]
    fn test_config_serializes_to_json() {
        let config = GapNetConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["network"]["dend_count"], 10);
        assert_eq!(json["gap_junctions"]["mechanism"], "cx36");
        assert_eq!(json["l5pc"]["figure"], "5a");
    }
}
