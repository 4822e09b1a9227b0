// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # gapnet-observability
//!
//! Logging setup shared by the gapnet binaries, with per-crate debug flag
//! support. Library crates only emit `tracing` events; installing a
//! subscriber is left to the binary.
//!
//! ## Features
//! - `file-logging`: JSON log files in a timestamped run folder (desktop only)

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known gapnet crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "gapnet",
    "gapnet-connectivity",
    "gapnet-config",
    "gapnet-observability",
];
