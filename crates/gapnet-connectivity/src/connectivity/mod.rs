// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Connectivity generation.

Builds the undirected cell graph that gap junctions are later placed on.
*/

pub mod adjacency;
pub mod generator;
pub mod matrix;

pub use adjacency::Adjacency;
pub use generator::{generate, ClusteredConnectivity, ENTRIES_PER_CELL};
