// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Seeded random number generation.

Network construction takes an explicit generator so that a seed fully
determines the result. Per-cell draws made at query time use a generator
derived from `(seed, gid)` and never touch shared state.

ChaCha8 is used instead of `StdRng`: its output stream is fixed, so a seed
keeps producing the same network across `rand` releases.
*/

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::types::CellGid;

/// Generator type used for every random draw
pub type GapNetRng = ChaCha8Rng;

/// Generator for network construction
pub fn network_rng(seed: u64) -> GapNetRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generator private to one cell
pub fn cell_rng(seed: u64, gid: CellGid) -> GapNetRng {
    // splitmix64 finalizer keeps neighbouring gids decorrelated
    let mut z = seed ^ (u64::from(gid) + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    ChaCha8Rng::seed_from_u64(z ^ (z >> 31))
}
