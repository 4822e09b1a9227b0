// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Single layer 5 pyramidal cell under somatic current clamp.

The morphology (NeuroML) and the decor (ACC) are files the engine adapter
loads; they stay opaque here. This module decides what goes on top of them:
which clamp protocol runs, where it is placed, what is recorded, how the
cable is discretized and how long the run lasts.

Protocols by figure:
- `4a`: one 5 ms pulse of 1.9 nA at 295 ms
- `4b`: one 2 s step of 0.793 nA at 700 ms, run to 3000 ms
- `5a`: five 5 ms pulses of 1.99 nA at 120 Hz from 250 ms
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use gapnet_config::{validate_config, GapNetConfig};

use crate::recipe::{CellKind, GlobalProperties, ProbeSpec, Recipe, RunSettings, DEFAULT_DT_MS};
use crate::types::{check_gid, CellGid, GapNetError, GapNetResult};

const INPUT_NAME: &str = "Input_0";
const STIMULUS_SEGMENT: u32 = 0;
const STIMULUS_FRACTION: f64 = 0.5;

const SHORT_TSTOP_MS: f64 = 400.0;
const LONG_TSTOP_MS: f64 = 3000.0;
const SAMPLE_INTERVAL_MS: f64 = 0.1;

const BURST_PULSES: u32 = 5;
const BURST_START_MS: f64 = 250.0;
const BURST_RATE_HZ: f64 = 120.0;

/// Clamp protocol, named after the figure it reproduces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Figure {
    #[serde(rename = "4a")]
    Fig4a,
    #[serde(rename = "4b")]
    Fig4b,
    #[serde(rename = "5a")]
    Fig5a,
}

impl Figure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Figure::Fig4a => "4a",
            Figure::Fig4b => "4b",
            Figure::Fig5a => "5a",
        }
    }

    /// Pulses injected through the cell's single input, in time order
    pub fn clamp_schedule(&self) -> Vec<CurrentClamp> {
        match self {
            Figure::Fig4a => vec![CurrentClamp::new(295.0, 5.0, 1.9)],
            Figure::Fig4b => vec![CurrentClamp::new(
                699.999988079071,
                2000.0,
                0.7929999989997327,
            )],
            Figure::Fig5a => (0..BURST_PULSES)
                .map(|i| {
                    let delay = BURST_START_MS + f64::from(i) * 1000.0 / BURST_RATE_HZ;
                    CurrentClamp::new(delay, 5.0, 1.99)
                })
                .collect(),
        }
    }

    pub fn tstop_ms(&self) -> f64 {
        match self {
            Figure::Fig4b => LONG_TSTOP_MS,
            Figure::Fig4a | Figure::Fig5a => SHORT_TSTOP_MS,
        }
    }
}

impl FromStr for Figure {
    type Err = GapNetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4a" => Ok(Figure::Fig4a),
            "4b" => Ok(Figure::Fig4b),
            "5a" => Ok(Figure::Fig5a),
            other => Err(GapNetError::InvalidConfig(format!(
                "unknown figure '{}', expected 4a, 4b or 5a",
                other
            ))),
        }
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Square current pulse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentClamp {
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub amplitude_na: f64,
}

impl CurrentClamp {
    pub fn new(delay_ms: f64, duration_ms: f64, amplitude_na: f64) -> Self {
        Self {
            delay_ms,
            duration_ms,
            amplitude_na,
        }
    }
}

/// A clamp placed on a labelled locset
///
/// Every pulse of one input shares the same placement label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClampPlacement {
    /// Quoted locset label, e.g. `"seg_0_frac_0.5"`
    pub locset: String,
    pub label: String,
    pub clamp: CurrentClamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CvPolicy {
    /// Control volumes no longer than this many um
    MaxExtent(f64),
}

/// Where the adapter reads the morphology from
///
/// The adapter also imports the file's segment, named segment and group
/// labels into the cell's label dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MorphologySource {
    pub path: String,
    pub name: String,
    pub allow_spherical_root: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct L5pcCellDescription {
    pub gid: CellGid,
    pub morphology: MorphologySource,
    /// ACC file whose decor the clamps are added to
    pub decor_path: String,
    /// `(name, expression)` pairs added after the morphology's own labels
    pub labels: Vec<(String, String)>,
    pub cv_policy: CvPolicy,
    pub clamps: Vec<ClampPlacement>,
}

/// Label on a fraction of a segment: `seg_{segment}_frac_{fraction}`
pub fn fraction_label(segment: u32, fraction: f64) -> (String, String) {
    (
        format!("seg_{}_frac_{}", segment, fraction),
        format!("(on-components {} (segment {}))", fraction, segment),
    )
}

/// Placement label of the clamps driving `input` at locset `tag`
pub fn clamp_label(input: &str, tag: &str) -> String {
    format!("ic_{}@{}", input, tag)
}

/// Single-cell recipe for the L5PC experiment
#[derive(Debug, Clone)]
pub struct L5pcRecipe {
    figure: Figure,
    morphology: MorphologySource,
    decor_path: String,
    catalogue: String,
    catalogue_prefix: String,
    cv_max_extent: f64,
}

impl L5pcRecipe {
    pub fn new(config: &GapNetConfig) -> GapNetResult<Self> {
        validate_config(config).map_err(|e| GapNetError::InvalidConfig(e.to_string()))?;

        let l5pc = &config.l5pc;
        let figure: Figure = l5pc.figure.parse()?;

        info!(
            figure = %figure,
            morphology = %l5pc.morphology_path,
            decor = %l5pc.decor_path,
            tstop_ms = figure.tstop_ms(),
            "Built L5PC recipe"
        );

        Ok(Self {
            figure,
            morphology: MorphologySource {
                path: l5pc.morphology_path.clone(),
                name: l5pc.morphology_name.clone(),
                allow_spherical_root: true,
            },
            decor_path: l5pc.decor_path.clone(),
            catalogue: l5pc.catalogue.clone(),
            catalogue_prefix: l5pc.catalogue_prefix.clone(),
            cv_max_extent: l5pc.cv_max_extent,
        })
    }

    pub fn figure(&self) -> Figure {
        self.figure
    }
}

impl Recipe for L5pcRecipe {
    type Cell = L5pcCellDescription;

    fn num_cells(&self) -> u32 {
        1
    }

    fn cell_kind(&self, gid: CellGid) -> GapNetResult<CellKind> {
        check_gid(gid, self.num_cells())?;
        Ok(CellKind::Cable)
    }

    fn cell_description(&self, gid: CellGid) -> GapNetResult<L5pcCellDescription> {
        check_gid(gid, self.num_cells())?;

        let (tag, expression) = fraction_label(STIMULUS_SEGMENT, STIMULUS_FRACTION);
        let label = clamp_label(INPUT_NAME, &tag);
        let locset = format!("\"{}\"", tag);
        let clamps = self
            .figure
            .clamp_schedule()
            .into_iter()
            .map(|clamp| ClampPlacement {
                locset: locset.clone(),
                label: label.clone(),
                clamp,
            })
            .collect();

        Ok(L5pcCellDescription {
            gid,
            morphology: self.morphology.clone(),
            decor_path: self.decor_path.clone(),
            labels: vec![("all".to_string(), "(all)".to_string()), (tag, expression)],
            cv_policy: CvPolicy::MaxExtent(self.cv_max_extent),
            clamps,
        })
    }

    fn probes(&self, gid: CellGid) -> GapNetResult<Vec<ProbeSpec>> {
        check_gid(gid, self.num_cells())?;
        Ok(vec![
            ProbeSpec::MembraneVoltage {
                locset: "(location 0 0.5)".to_string(),
            },
            ProbeSpec::MembraneVoltageCell,
        ])
    }

    fn global_properties(&self, _kind: CellKind) -> GlobalProperties {
        GlobalProperties {
            catalogue: self.catalogue.clone(),
            catalogue_prefix: self.catalogue_prefix.clone(),
            junction_mechanism: None,
        }
    }

    fn run_settings(&self) -> RunSettings {
        RunSettings {
            tstop_ms: self.figure.tstop_ms(),
            dt_ms: DEFAULT_DT_MS,
            sample_interval_ms: SAMPLE_INTERVAL_MS,
        }
    }
}
