// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Recipe table generator.
//!
//! Loads `gapnet_configuration.toml` (or defaults when none is found by
//! search), builds the selected recipe and writes it as JSON to stdout:
//! - `--model io` (default): the gap junction table of the network
//! - `--model l5pc`: the single-cell description, clamps and run settings
//!
//! Logs go to stderr.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use serde_json::json;

use gapnet::config::{load_config_or_default, GapNetConfig};
use gapnet::connectivity::{CellKind, L5pcRecipe, NetworkRecipe, Recipe};
use gapnet::observability::{debug_flags_help, init_logging, parse_debug_flags};

const OVERRIDE_KEYS: &[&str] = &[
    "seed",
    "ncells",
    "cluster_coef",
    "cluster_size",
    "dend_count",
    "gj_weight",
    "log_level",
    "figure",
];

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: gapnet_network [--config <path>] [--model io|l5pc] [--<key> <value>]... \
         [--debug-<crate>]\n\n\
         Override keys:\n  \
         --seed --ncells --cluster-coef --cluster-size --dend-count --gj-weight --log-level\n  \
         --figure\n\n\
         {}",
        debug_flags_help()
    );
    process::exit(2);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Model {
    Io,
    L5pc,
}

struct Args {
    config_path: Option<PathBuf>,
    model: Model,
    overrides: HashMap<String, String>,
}

fn parse_args() -> Args {
    let mut config_path = None;
    let mut model = Model::Io;
    let mut overrides = HashMap::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                config_path = Some(PathBuf::from(v));
            }
            "--model" => {
                model = match args.next().as_deref() {
                    Some("io") => Model::Io,
                    Some("l5pc") => Model::L5pc,
                    _ => usage_and_exit(),
                };
            }
            "-h" | "--help" => usage_and_exit(),
            // Consumed by parse_debug_flags
            other if other.starts_with("--debug-") => {}
            other => {
                let key = other
                    .strip_prefix("--")
                    .map(|k| k.replace('-', "_"))
                    .filter(|k| OVERRIDE_KEYS.contains(&k.as_str()));
                let Some(key) = key else {
                    eprintln!("Unknown argument: {other}");
                    usage_and_exit();
                };
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                overrides.insert(key, v);
            }
        }
    }

    Args {
        config_path,
        model,
        overrides,
    }
}

fn main() -> Result<()> {
    let args = parse_args();
    let debug_flags = parse_debug_flags();
    let config = load_config_or_default(args.config_path.as_deref(), Some(&args.overrides))
        .context("Failed to load configuration")?;

    let _guard = init_logging(
        &debug_flags,
        &config.logging.level,
        Some(PathBuf::from(&config.logging.log_dir)),
    )?;

    let output = match args.model {
        Model::Io => network_table(&config)?,
        Model::L5pc => l5pc_table(&config)?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn network_table(config: &GapNetConfig) -> Result<serde_json::Value> {
    let recipe = NetworkRecipe::new(config).context("Failed to build network")?;

    let mut cells = Vec::with_capacity(recipe.num_cells() as usize);
    for gid in 0..recipe.num_cells() {
        cells.push(json!({
            "gid": gid,
            "gap_junctions": recipe.gap_junctions_on(gid)?,
        }));
    }

    Ok(json!({
        "seed": config.network.seed,
        "run": recipe.run_settings(),
        "stats": recipe.stats(),
        "cells": cells,
    }))
}

fn l5pc_table(config: &GapNetConfig) -> Result<serde_json::Value> {
    let recipe = L5pcRecipe::new(config).context("Failed to build L5PC recipe")?;

    Ok(json!({
        "figure": recipe.figure(),
        "run": recipe.run_settings(),
        "properties": recipe.global_properties(CellKind::Cable),
        "cell": recipe.cell_description(0)?,
        "recording": recipe.probes(0)?,
    }))
}
