//! Analysis thresholds.
//!
//! Every threshold the pipeline uses lives on [`AnalysisConfig`], which is
//! passed explicitly into each stage. Configurations can be loaded from JSON
//! so that thresholds can be tuned per species or per instrument without
//! recompiling; missing keys fall back to the published defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, ConfigError};

/// Thresholds for segmentation, element detection and classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Depth below which the animal is considered at the surface.
    pub min_depth: f64,
    /// Fraction of max depth that counts as "deep enough" for the bottom phase.
    pub ledge_fraction: f64,
    /// Minimum number of consecutive slow points forming a step.
    pub min_step_points: u32,
    /// Exclusive upper bound on vertical velocity for a step point.
    pub max_step_velocity: f64,
    /// Broadness index below which a dive is V-shaped.
    pub broadness_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_depth: 1.0,
            ledge_fraction: 0.75,
            min_step_points: 5,
            max_step_velocity: 0.35,
            broadness_threshold: 0.015,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(&path)?;
        let config = Self::from_json(&contents)?;
        log::info!("[Config] Loaded analysis configuration from {:?}", path.as_ref());
        Ok(config)
    }

    /// Load from `path`, falling back to defaults if the file is missing or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!(
                    "[Config] {} ({:?}). Using defaults.",
                    err,
                    path.as_ref()
                );
                Self::default()
            }
        }
    }

    /// Check every threshold is finite and within its domain.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let reals = [
            ("min_depth", self.min_depth),
            ("ledge_fraction", self.ledge_fraction),
            ("max_step_velocity", self.max_step_velocity),
            ("broadness_threshold", self.broadness_threshold),
        ];
        for (name, value) in reals {
            if !value.is_finite() {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        if self.min_depth <= 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "min_depth must be positive, got {}",
                self.min_depth
            )));
        }
        if self.ledge_fraction <= 0.0 || self.ledge_fraction > 1.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "ledge_fraction must be in (0, 1], got {}",
                self.ledge_fraction
            )));
        }
        if self.min_step_points == 0 {
            return Err(AnalysisError::InvalidConfig(
                "min_step_points must be at least 1".to_string(),
            ));
        }
        if self.max_step_velocity <= 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "max_step_velocity must be positive, got {}",
                self.max_step_velocity
            )));
        }
        if self.broadness_threshold < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "broadness_threshold must not be negative, got {}",
                self.broadness_threshold
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.min_depth, 1.0);
        assert_eq!(config.ledge_fraction, 0.75);
        assert_eq!(config.min_step_points, 5);
        assert_eq!(config.max_step_velocity, 0.35);
        assert_eq!(config.broadness_threshold, 0.015);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AnalysisConfig::from_json(r#"{"min_depth": 4.0, "min_step_points": 8}"#)
            .unwrap();
        assert_eq!(config.min_depth, 4.0);
        assert_eq!(config.min_step_points, 8);
        assert_eq!(config.ledge_fraction, 0.75);
        assert_eq!(config.broadness_threshold, 0.015);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AnalysisConfig {
            ledge_fraction: 0.6,
            ..AnalysisConfig::default()
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert_eq!(AnalysisConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json() {
        let err = AnalysisConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let err = AnalysisConfig::load_from_file("/nonexistent/tdr_config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));

        let config = AnalysisConfig::load_or_default("/nonexistent/tdr_config.json");
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_validate_rejects_out_of_domain_values() {
        let cases = [
            AnalysisConfig {
                min_depth: 0.0,
                ..AnalysisConfig::default()
            },
            AnalysisConfig {
                ledge_fraction: 1.5,
                ..AnalysisConfig::default()
            },
            AnalysisConfig {
                min_step_points: 0,
                ..AnalysisConfig::default()
            },
            AnalysisConfig {
                max_step_velocity: -0.1,
                ..AnalysisConfig::default()
            },
            AnalysisConfig {
                broadness_threshold: f64::NAN,
                ..AnalysisConfig::default()
            },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(AnalysisError::InvalidConfig(_))),
                "expected rejection for {config:?}"
            );
        }
    }
}
