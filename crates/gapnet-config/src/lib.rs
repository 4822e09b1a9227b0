// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # gapnet configuration
//!
//! Type-safe configuration loader for the gap-junction network recipe:
//! - TOML file parsing (`gapnet_configuration.toml`)
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gapnet_config::{load_config, validate_config};
//!
//! let config = load_config(None, None).expect("Failed to load config");
//! validate_config(&config).expect("Invalid config");
//!
//! println!("cells: {}", config.network.ncells);
//! println!("cluster coefficient: {}", config.network.cluster_coef);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    load_config_or_default,
};
pub use types::*;
pub use validation::{
    collect_errors, validate_config, ConfigValidationError, L5PC_FIGURES, LOG_LEVELS,
};

/// Re-export for convenience
pub use serde;

/// Name of the configuration file searched for on disk
pub const CONFIG_FILE_NAME: &str = "gapnet_configuration.toml";

/// Errors raised while locating, reading or checking a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0}")]
    FileNotFound(String),

    #[error("Cannot read configuration: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed configuration TOML: {0}")]
    ParseError(String),

    #[error("{0}")]
    ValidationError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
