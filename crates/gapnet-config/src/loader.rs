// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three tiers, later tiers win:
//! 1. TOML file (base values, missing keys fall back to defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, GapNetConfig, CONFIG_FILE_NAME};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Find the gapnet configuration file
///
/// Search order:
/// 1. `GAPNET_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to five parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("GAPNET_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by GAPNET_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet GAPNET_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML.
/// Value ranges are checked separately by [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<GapNetConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: GapNetConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// [`load_config`] that falls back to defaults when the search finds no file
///
/// A file named by `config_path` or `GAPNET_CONFIG_PATH` must exist; only an
/// unsuccessful search yields the defaults (with env and CLI overrides applied).
pub fn load_config_or_default(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<GapNetConfig> {
    let searched = config_path.is_none() && env::var_os("GAPNET_CONFIG_PATH").is_none();
    match load_config(config_path, cli_args) {
        Err(ConfigError::FileNotFound(_)) if searched => {
            let mut config = GapNetConfig::default();
            apply_environment_overrides(&mut config);
            if let Some(cli) = cli_args {
                apply_cli_overrides(&mut config, cli);
            }
            Ok(config)
        }
        result => result,
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `GAPNET_SEED` -> `network.seed`
/// - `GAPNET_NCELLS` -> `network.ncells`
/// - `GAPNET_CLUSTER_COEF` -> `network.cluster_coef`
/// - `GAPNET_CLUSTER_SIZE` -> `network.cluster_size`
/// - `GAPNET_DEND_COUNT` -> `network.dend_count`
/// - `GAPNET_GJ_WEIGHT` -> `gap_junctions.weight`
/// - `GAPNET_L5PC_FIGURE` -> `l5pc.figure`
/// - `GAPNET_LOG_LEVEL` -> `logging.level`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut GapNetConfig) {
    let vars: HashMap<String, String> = [
        ("seed", "GAPNET_SEED"),
        ("ncells", "GAPNET_NCELLS"),
        ("cluster_coef", "GAPNET_CLUSTER_COEF"),
        ("cluster_size", "GAPNET_CLUSTER_SIZE"),
        ("dend_count", "GAPNET_DEND_COUNT"),
        ("gj_weight", "GAPNET_GJ_WEIGHT"),
        ("figure", "GAPNET_L5PC_FIGURE"),
        ("log_level", "GAPNET_LOG_LEVEL"),
    ]
    .into_iter()
    .filter_map(|(key, var)| env::var(var).ok().map(|value| (key.to_string(), value)))
    .collect();

    apply_overrides(config, &vars);
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - CLI arguments keyed by name (e.g., `{"ncells": "64", "seed": "7"}`)
pub fn apply_cli_overrides(config: &mut GapNetConfig, cli_args: &HashMap<String, String>) {
    apply_overrides(config, cli_args);
}

fn apply_overrides(config: &mut GapNetConfig, values: &HashMap<String, String>) {
    if let Some(seed) = values.get("seed").and_then(|v| v.parse::<u64>().ok()) {
        config.network.seed = seed;
    }
    if let Some(ncells) = values.get("ncells").and_then(|v| v.parse::<u32>().ok()) {
        config.network.ncells = ncells;
    }
    if let Some(coef) = values.get("cluster_coef").and_then(|v| v.parse::<f64>().ok()) {
        config.network.cluster_coef = coef;
    }
    if let Some(size) = values.get("cluster_size").and_then(|v| v.parse::<u32>().ok()) {
        config.network.cluster_size = size;
    }
    if let Some(count) = values.get("dend_count").and_then(|v| v.parse::<u32>().ok()) {
        config.network.dend_count = count;
    }
    if let Some(weight) = values.get("gj_weight").and_then(|v| v.parse::<f64>().ok()) {
        config.gap_junctions.weight = weight;
    }
    if let Some(figure) = values.get("figure") {
        config.l5pc.figure = figure.clone();
    }
    if let Some(level) = values.get("log_level") {
        config.logging.level = level.clone();
    }
}
