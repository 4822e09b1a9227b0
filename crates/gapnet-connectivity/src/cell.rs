// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Starfish cell template.

```text
   gj0        gj1
     \        /
     dend   dend
          \  /
 --axon--- SOMA----dend---gj2
           /  \
        dend  dend
         /       \
       gj4       gj3
```

A [`CellDescription`] is plain data. The engine adapter turns it into its own
cable cell; nothing here depends on the engine.
*/

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::rng::cell_rng;
use crate::types::{CellGid, GapNetError, GapNetResult, PortId};

pub const SOMA_TAG: u32 = 1;
pub const AXON_TAG: u32 = 2;
pub const DEND_TAG: u32 = 3;

const SOMA_RADIUS: f64 = 12.0;
const NEURITE_RADIUS: f64 = 2.0;
const DEND_ORIGIN_X: f64 = 6.0;
const AXON_START_RANGE: std::ops::RangeInclusive<u32> = 41..=50;
const DEND_END_RANGE: std::ops::RangeInclusive<u32> = 180..=250;

/// Label of the junction site at the tip of dendrite `port`
pub fn junction_label(port: PortId) -> String {
    format!("gj{}", port)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub radius: f64,
}

impl Point {
    fn on_axis(x: f64, radius: f64) -> Self {
        Self {
            x,
            y: 0.0,
            z: 0.0,
            radius,
        }
    }
}

/// One frustum of the morphology; `parent` indexes into the segment list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub parent: Option<usize>,
    pub proximal: Point,
    pub distal: Point,
    pub tag: u32,
}

/// Mechanism painted on a region, with its parameter overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Density {
    pub region: String,
    pub mechanism: String,
    pub parameters: Vec<(String, f64)>,
}

/// Reversal potential of one ion species (mV)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IonReversal {
    pub ion: String,
    pub rev_pot: f64,
}

/// Junction mechanism placed on a labelled locset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JunctionSite {
    pub label: String,
    pub mechanism: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellDescription {
    pub gid: CellGid,
    pub segments: Vec<Segment>,
    /// `(name, region or locset expression)`
    pub labels: Vec<(String, String)>,
    pub densities: Vec<Density>,
    pub ions: Vec<IonReversal>,
    pub junction_sites: Vec<JunctionSite>,
    /// Membrane capacitance (F/m^2)
    pub cm: f64,
    /// Resting potential (mV)
    pub vm: f64,
    /// Axial resistivity (Ohm.cm)
    pub axial_resistivity: f64,
}

impl CellDescription {
    pub fn dendrite_count(&self) -> usize {
        self.segments.iter().filter(|s| s.tag == DEND_TAG).count()
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, expr)| expr.as_str())
    }
}

/// Inputs of the cell template shared by every gid
#[derive(Debug, Clone, PartialEq)]
pub struct CellTemplate {
    pub seed: u64,
    pub dend_count: u32,
    pub junction_mechanism: String,
    /// Relative standard deviation of the parameter jitter
    pub jitter: f64,
    pub cm: f64,
    pub axial_resistivity: f64,
}

struct Jitter<'a, R: Rng> {
    rng: &'a mut R,
    relative_sd: f64,
}

impl<R: Rng> Jitter<'_, R> {
    /// Normal draw around `mean` with sd `relative_sd * |mean|`
    fn around(&mut self, mean: f64) -> GapNetResult<f64> {
        let sd = self.relative_sd * mean.abs();
        if sd == 0.0 {
            return Ok(mean);
        }
        let normal = Normal::new(mean, sd)
            .map_err(|e| GapNetError::Internal(format!("jitter around {}: {}", mean, e)))?;
        Ok(normal.sample(&mut *self.rng))
    }
}

impl CellTemplate {
    /// Build the description of `gid`
    ///
    /// Depends only on `(seed, gid)`, so repeated queries agree.
    pub fn describe(&self, gid: CellGid) -> GapNetResult<CellDescription> {
        let mut rng = cell_rng(self.seed, gid);

        let segments = self.morphology(&mut rng);
        let labels = self.labels();

        let mut jitter = Jitter {
            rng: &mut rng,
            relative_sd: self.jitter,
        };
        let densities = Self::densities(&mut jitter)?;
        let vm = -jitter.around(65.0)?;
        let ions = vec![
            IonReversal {
                ion: "ca".to_string(),
                rev_pot: jitter.around(120.0)?,
            },
            IonReversal {
                ion: "na".to_string(),
                rev_pot: jitter.around(55.0)?,
            },
            IonReversal {
                ion: "k".to_string(),
                rev_pot: -jitter.around(75.0)?,
            },
        ];

        let junction_sites = (0..self.dend_count)
            .map(|port| JunctionSite {
                label: junction_label(port),
                mechanism: self.junction_mechanism.clone(),
            })
            .collect();

        Ok(CellDescription {
            gid,
            segments,
            labels,
            densities,
            ions,
            junction_sites,
            cm: self.cm,
            vm,
            axial_resistivity: self.axial_resistivity,
        })
    }

    fn morphology<R: Rng>(&self, rng: &mut R) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(2 + self.dend_count as usize);
        segments.push(Segment {
            parent: None,
            proximal: Point::on_axis(-SOMA_RADIUS, SOMA_RADIUS),
            distal: Point::on_axis(0.0, SOMA_RADIUS),
            tag: SOMA_TAG,
        });

        // Axon runs from +L back to the soma's proximal face
        let axon_start = f64::from(rng.gen_range(AXON_START_RANGE));
        segments.push(Segment {
            parent: Some(0),
            proximal: Point::on_axis(axon_start, NEURITE_RADIUS),
            distal: Point::on_axis(-SOMA_RADIUS, NEURITE_RADIUS),
            tag: AXON_TAG,
        });

        for _ in 0..self.dend_count {
            let end = f64::from(rng.gen_range(DEND_END_RANGE));
            segments.push(Segment {
                parent: Some(0),
                proximal: Point::on_axis(DEND_ORIGIN_X, NEURITE_RADIUS),
                distal: Point::on_axis(end, NEURITE_RADIUS),
                tag: DEND_TAG,
            });
        }
        segments
    }

    fn labels(&self) -> Vec<(String, String)> {
        let mut labels: Vec<(String, String)> = [
            ("soma", "(tag 1)"),
            ("axon", "(tag 2)"),
            ("dend", "(tag 3)"),
            ("all", "(all)"),
            ("root", "(root)"),
        ]
        .into_iter()
        .map(|(name, expr)| (name.to_string(), expr.to_string()))
        .collect();

        // Branches follow segment order: soma 0, axon 1, dendrite i at i + 2
        for port in 0..self.dend_count {
            labels.push((junction_label(port), format!("(location {} 1)", port + 2)));
        }
        labels
    }

    fn densities<R: Rng>(jitter: &mut Jitter<'_, R>) -> GapNetResult<Vec<Density>> {
        // (region, mechanism, jittered conductance, fixed parameters)
        let table: [(&str, &str, Option<f64>, &[(&str, f64)]); 12] = [
            ("soma", "hh", None, &[]),
            ("soma", "na_s", Some(0.030), &[]),
            ("soma", "kdr", Some(0.030), &[("ek", -75.0)]),
            ("soma", "cal", Some(0.045), &[]),
            ("dend", "cah", Some(0.010), &[]),
            ("dend", "kca", Some(0.220), &[("ek", -75.0)]),
            ("dend", "h", Some(0.015), &[("eh", -43.0)]),
            ("dend", "cacc", Some(0.000), &[]),
            ("axon", "na_a", Some(0.200), &[]),
            ("axon", "k", Some(0.200), &[("ek", -75.0)]),
            ("soma", "k", Some(0.015), &[("ek", -75.0)]),
            ("all", "leak", Some(1.3e-05), &[("eleak", 10.0)]),
        ];

        let mut densities = Vec::with_capacity(table.len() + 1);
        for (region, mechanism, conductance, fixed) in table {
            let mut parameters = Vec::with_capacity(fixed.len() + 1);
            if let Some(mean) = conductance {
                parameters.push(("conductance".to_string(), jitter.around(mean)?));
            }
            parameters.extend(fixed.iter().map(|(name, v)| (name.to_string(), *v)));
            densities.push(Density {
                region: region.to_string(),
                mechanism: mechanism.to_string(),
                parameters,
            });
        }
        densities.push(Density {
            region: "all".to_string(),
            mechanism: "ca_conc".to_string(),
            parameters: vec![("initialConcentration".to_string(), 3.7152)],
        });
        Ok(densities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(dend_count: u32) -> CellTemplate {
        CellTemplate {
            seed: 0,
            dend_count,
            junction_mechanism: "cx36".to_string(),
            jitter: 0.2,
            cm: 0.01,
            axial_resistivity: 100.0,
        }
    }

    #[test]
    fn test_description_is_deterministic() {
        let t = template(10);
        assert_eq!(t.describe(3).unwrap(), t.describe(3).unwrap());
        assert_ne!(t.describe(3).unwrap(), t.describe(4).unwrap());
    }

    #[test]
    fn test_morphology_shape() {
        let cell = template(5).describe(0).unwrap();
        assert_eq!(cell.segments.len(), 7);
        assert_eq!(cell.dendrite_count(), 5);
        assert_eq!(cell.segments[0].tag, SOMA_TAG);
        assert_eq!(cell.segments[1].tag, AXON_TAG);

        let axon = &cell.segments[1];
        assert_eq!(axon.parent, Some(0));
        assert!((41.0..=50.0).contains(&axon.proximal.x));
        assert_eq!(axon.distal.x, -12.0);
        assert_eq!(axon.distal.radius, 2.0);
        for dend in cell.segments.iter().filter(|s| s.tag == DEND_TAG) {
            assert_eq!(dend.parent, Some(0));
            assert!((180.0..=250.0).contains(&dend.distal.x));
        }
    }

    #[test]
    fn test_junction_sites_and_labels() {
        let cell = template(3).describe(1).unwrap();
        let labels: Vec<&str> = cell.junction_sites.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["gj0", "gj1", "gj2"]);
        assert_eq!(cell.label("gj2"), Some("(location 4 1)"));
        assert_eq!(cell.label("root"), Some("(root)"));
        assert!(cell.junction_sites.iter().all(|s| s.mechanism == "cx36"));
    }

    #[test]
    fn test_zero_jitter_gives_nominal_values() {
        let mut t = template(2);
        t.jitter = 0.0;
        let cell = t.describe(0).unwrap();
        assert_eq!(cell.vm, -65.0);
        let kdr = cell
            .densities
            .iter()
            .find(|d| d.mechanism == "kdr")
            .unwrap();
        assert_eq!(
            kdr.parameters,
            vec![("conductance".to_string(), 0.030), ("ek".to_string(), -75.0)]
        );
        let k = cell.ions.iter().find(|i| i.ion == "k").unwrap();
        assert_eq!(k.rev_pot, -75.0);
    }

    #[test]
    fn test_hh_has_no_parameters() {
        let cell = template(1).describe(0).unwrap();
        let hh = cell.densities.iter().find(|d| d.mechanism == "hh").unwrap();
        assert!(hh.parameters.is_empty());
        assert_eq!(cell.densities.len(), 13);
    }
}
