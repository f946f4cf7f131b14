//! Dive shape classification for time-depth recorder (TDR) records.
//!
//! A record is split into dives at the surface threshold, then each dive is
//! run through the same stages: descriptive statistics, vertical velocity,
//! wiggle and step detection, bottom-phase location and labelling, bottom
//! quantification, shape indices and finally a V / u / U / W / undefined
//! shape.
//!
//! # Example
//!
//! ```
//! use tdr_dive_shape::{analyze_dives, default_analysis_config, DiveShape, Sample};
//!
//! let samples: Vec<Sample> = [0.0, 1.0, 2.0, 3.0, 2.0, 1.0, 0.0]
//!     .iter()
//!     .enumerate()
//!     .map(|(t, &depth)| Sample::new(t as f64, depth))
//!     .collect();
//!
//! let dives = analyze_dives(samples, default_analysis_config()).expect("valid record");
//! assert_eq!(dives.len(), 1);
//! assert_eq!(dives[0].shape, DiveShape::V);
//! ```

pub mod bottom;
pub mod config;
pub mod elements;
pub mod error;
pub mod import;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod segment;
pub mod shape;

uniffi::setup_scaffolding!();

pub use config::AnalysisConfig;
pub use error::{AnalysisError, ConfigError, ImportError};
pub use models::{BottomPhase, Dive, DiveShape, Element, ElementKind, Phase, Point, Sample};
pub use pipeline::{analyze, analyze_dive, ShapeSummary};

/// Analyse a complete record and return its dives in index order.
#[uniffi::export]
pub fn analyze_dives(
    samples: Vec<Sample>,
    config: AnalysisConfig,
) -> Result<Vec<Dive>, AnalysisError> {
    pipeline::analyze(&samples, &config)
}

#[uniffi::export]
pub fn default_analysis_config() -> AnalysisConfig {
    AnalysisConfig::default()
}

/// Parse a TDR CSV export into samples.
#[uniffi::export]
pub fn parse_tdr_export(text: String) -> Result<Vec<Sample>, ImportError> {
    import::parse_tdr_export(&text)
}

#[uniffi::export]
pub fn summarize_shapes(dives: Vec<Dive>) -> ShapeSummary {
    ShapeSummary::from_dives(&dives)
}
