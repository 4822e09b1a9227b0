// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Network generation assumes these bounds, so they are checked before any
//! random draw is made.

use crate::{ConfigError, ConfigResult, GapNetConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Every violation is collected and reported in a single error.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &GapNetConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

/// List every violation without failing
pub fn collect_errors(config: &GapNetConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_network(config, &mut errors);
    validate_gap_junctions(config, &mut errors);
    validate_cell(config, &mut errors);
    validate_l5pc(config, &mut errors);
    validate_logging(config, &mut errors);
    errors
}

/// Level names accepted by the log filter
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Clamp protocols of the single-cell experiment
pub const L5PC_FIGURES: &[&str] = &["4a", "4b", "5a"];

fn invalid(errors: &mut Vec<ConfigValidationError>, field: &str, reason: &str) {
    errors.push(ConfigValidationError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    });
}

fn validate_network(config: &GapNetConfig, errors: &mut Vec<ConfigValidationError>) {
    let network = &config.network;

    if network.ncells == 0 {
        invalid(errors, "network.ncells", "must be greater than 0");
    }
    if network.cluster_size == 0 {
        invalid(errors, "network.cluster_size", "must be greater than 0");
    }
    if network.dend_count == 0 {
        invalid(errors, "network.dend_count", "must be greater than 0");
    }
    if !(0.0..=1.0).contains(&network.cluster_coef) {
        // Also rejects NaN
        invalid(errors, "network.cluster_coef", "must be between 0.0 and 1.0");
    }
}

fn validate_gap_junctions(config: &GapNetConfig, errors: &mut Vec<ConfigValidationError>) {
    if !config.gap_junctions.weight.is_finite() {
        invalid(errors, "gap_junctions.weight", "must be a finite number");
    }
    if config.gap_junctions.mechanism.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "gap_junctions.mechanism".to_string(),
        });
    }
}

fn validate_cell(config: &GapNetConfig, errors: &mut Vec<ConfigValidationError>) {
    let cell = &config.cell;

    if cell.catalogue.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "cell.catalogue".to_string(),
        });
    }
    if !cell.jitter.is_finite() || cell.jitter < 0.0 {
        invalid(errors, "cell.jitter", "must be a non-negative finite number");
    }
    if !(cell.cm.is_finite() && cell.cm > 0.0) {
        invalid(errors, "cell.cm", "must be positive");
    }
    if !(cell.axial_resistivity.is_finite() && cell.axial_resistivity > 0.0) {
        invalid(errors, "cell.axial_resistivity", "must be positive");
    }
}

fn validate_l5pc(config: &GapNetConfig, errors: &mut Vec<ConfigValidationError>) {
    let l5pc = &config.l5pc;

    if !L5PC_FIGURES.contains(&l5pc.figure.as_str()) {
        invalid(errors, "l5pc.figure", "must be '4a', '4b' or '5a'");
    }
    for (field, value) in [
        ("l5pc.morphology_path", &l5pc.morphology_path),
        ("l5pc.morphology_name", &l5pc.morphology_name),
        ("l5pc.decor_path", &l5pc.decor_path),
        ("l5pc.catalogue", &l5pc.catalogue),
    ] {
        if value.is_empty() {
            errors.push(ConfigValidationError::MissingRequired {
                field: field.to_string(),
            });
        }
    }
    if !(l5pc.cv_max_extent.is_finite() && l5pc.cv_max_extent > 0.0) {
        invalid(errors, "l5pc.cv_max_extent", "must be positive");
    }
}

fn validate_logging(config: &GapNetConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        invalid(
            errors,
            "logging.level",
            "must be one of trace, debug, info, warn, error, off",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GapNetConfig::default();
        let result = validate_config(&config);
        if let Err(e) = &result {
            eprintln!("Validation error: {}", e);
        }
        assert!(result.is_ok());
    }

    #[test]
    fn test_zero_cluster_size() {
        let mut config = GapNetConfig::default();
        config.network.cluster_size = 0;

        let result = validate_config(&config);
        assert!(result.is_err());

        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("network.cluster_size"));
        }
    }

    #[test]
    fn test_cluster_coef_out_of_range() {
        for coef in [-0.1, 1.5, f64::NAN] {
            let mut config = GapNetConfig::default();
            config.network.cluster_coef = coef;

            let errors = collect_errors(&config);
            assert_eq!(errors.len(), 1, "coef {} should be rejected once", coef);
            assert!(errors[0].to_string().contains("0.0 and 1.0"));
        }
    }

    #[test]
    fn test_cluster_coef_bounds_are_inclusive() {
        for coef in [0.0, 1.0] {
            let mut config = GapNetConfig::default();
            config.network.cluster_coef = coef;
            assert!(validate_config(&config).is_ok());
        }
    }

    #[test]
    fn test_all_violations_reported_together() {
        let mut config = GapNetConfig::default();
        config.network.ncells = 0;
        config.network.dend_count = 0;
        config.gap_junctions.weight = f64::INFINITY;
        config.cell.catalogue = String::new();

        let result = validate_config(&config);
        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("network.ncells"));
            assert!(msg.contains("network.dend_count"));
            assert!(msg.contains("gap_junctions.weight"));
            assert!(msg.contains("cell.catalogue"));
        } else {
            panic!("expected validation error");
        }
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = GapNetConfig::default();
        config.logging.level = "verbose".to_string();

        let result = validate_config(&config);
        if let Err(ConfigError::ValidationError(msg)) = result {
            assert!(msg.contains("logging.level"));
            assert!(msg.contains("trace"));
        } else {
            panic!("expected validation error");
        }
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        for level in ["DEBUG", "Warn", "off"] {
            let mut config = GapNetConfig::default();
            config.logging.level = level.to_string();
            assert!(validate_config(&config).is_ok(), "level {}", level);
        }
    }

    #[test]
    fn test_invalid_l5pc_settings() {
        let mut config = GapNetConfig::default();
        config.l5pc.figure = "6c".to_string();
        config.l5pc.decor_path = String::new();
        config.l5pc.cv_max_extent = 0.0;

        let errors = collect_errors(&config);
        let fields: Vec<String> = errors
            .iter()
            .map(|e| match e {
                ConfigValidationError::MissingRequired { field } => field.clone(),
                ConfigValidationError::InvalidValue { field, .. } => field.clone(),
            })
            .collect();
        assert_eq!(
            fields,
            vec!["l5pc.figure", "l5pc.decor_path", "l5pc.cv_max_extent"]
        );
    }
}
