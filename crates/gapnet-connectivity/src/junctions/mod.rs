// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Gap junction placement on top of the cell graph.
*/

pub mod neighbors;
pub mod store;

pub use neighbors::{neighbors_of, neighbors_of_signed, Neighbor};
pub use store::GapJunctionStore;
