// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end: configuration file to recipe through the umbrella crate.

use std::collections::HashMap;
use std::fs;

use gapnet::prelude::*;
use tempfile::tempdir;

#[test]
fn test_recipe_from_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(gapnet::config::CONFIG_FILE_NAME);
    fs::write(
        &path,
        "[network]\nseed = 5\nncells = 24\ncluster_size = 6\ndend_count = 3\n\n\
         [gap_junctions]\nweight = 0.01\n",
    )
    .unwrap();

    let mut cli = HashMap::new();
    cli.insert("seed".to_string(), "5".to_string());
    let config = load_config(Some(&path), Some(&cli)).unwrap();
    validate_config(&config).unwrap();

    let recipe = NetworkRecipe::new(&config).unwrap();
    assert_eq!(recipe.num_cells(), 24);
    assert_eq!(recipe.stats().edge_count, 120);

    for gid in 0..24 {
        for gj in recipe.gap_junctions_on(gid).unwrap() {
            assert_eq!(gj.weight, 0.01);
            assert!(["gj0", "gj1", "gj2"].contains(&gj.local_label.as_str()));
        }
    }
}

#[test]
fn test_invalid_file_values_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(gapnet::config::CONFIG_FILE_NAME);
    fs::write(&path, "[network]\ncluster_coef = 1.5\n").unwrap();

    let config = load_config(Some(&path), None).unwrap();
    assert!(validate_config(&config).is_err());
    assert!(matches!(
        NetworkRecipe::new(&config),
        Err(GapNetError::InvalidConfig(_))
    ));
}

#[test]
fn test_l5pc_recipe_from_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(gapnet::config::CONFIG_FILE_NAME);
    fs::write(
        &path,
        "[l5pc]\nfigure = \"4a\"\nmorphology_path = \"cells/l5pc.nml\"\n",
    )
    .unwrap();

    let mut cli = HashMap::new();
    cli.insert("figure".to_string(), "4b".to_string());
    let config = load_config(Some(&path), Some(&cli)).unwrap();

    let recipe = L5pcRecipe::new(&config).unwrap();
    assert_eq!(recipe.num_cells(), 1);
    assert_eq!(recipe.run_settings().tstop_ms, 3000.0);

    let cell = recipe.cell_description(0).unwrap();
    assert_eq!(cell.morphology.path, "cells/l5pc.nml");
    assert_eq!(cell.clamps.len(), 1);
    assert_eq!(cell.clamps[0].clamp.duration_ms, 2000.0);
}
