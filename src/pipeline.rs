//! End-to-end dive analysis.
//!
//! Segmentation runs once over the whole record. Every later stage only
//! reads one dive's own samples and scalars, so dives are analysed in
//! parallel and gathered back in index order.

use rayon::prelude::*;

use crate::bottom;
use crate::config::AnalysisConfig;
use crate::elements;
use crate::error::AnalysisError;
use crate::metrics::{self, DiveStats};
use crate::models::{Dive, DiveShape, Sample};
use crate::segment;
use crate::shape;

/// Analyse a full record and return its dives in index order.
pub fn analyze(samples: &[Sample], config: &AnalysisConfig) -> Result<Vec<Dive>, AnalysisError> {
    config.validate()?;

    let runs = segment::dives(samples, config.min_depth);
    let results: Vec<Result<Dive, AnalysisError>> = runs
        .par_iter()
        .map(|(index, dive_samples)| analyze_dive(*index, dive_samples, config))
        .collect();

    // report the earliest failing dive, not whichever worker failed first
    let dives = results.into_iter().collect::<Result<Vec<Dive>, AnalysisError>>()?;

    log::info!(
        "analysed {} samples into {} dives",
        samples.len(),
        dives.len()
    );
    Ok(dives)
}

/// Run every per-dive stage over the samples of a single dive.
pub fn analyze_dive(
    index: u32,
    samples: &[Sample],
    config: &AnalysisConfig,
) -> Result<Dive, AnalysisError> {
    let stats = DiveStats::compute(samples, config.ledge_fraction);
    let points = metrics::vertical_velocities(index, samples)?;
    let elements = elements::detect_elements(
        &points,
        config.max_step_velocity,
        config.min_step_points as usize,
    );

    let interval = bottom::locate(&stats, &elements);
    let points = bottom::label_phases(&points, &interval);
    let bottom_phase = bottom::quantify(&stats, &interval, &points, &elements);
    let shape = shape::classify(
        &bottom_phase,
        &bottom::bottom_wiggles(&elements, &interval),
        stats.ledge_depth,
        config.broadness_threshold,
    );

    log::debug!(
        "dive {}: {} points, {} elements, {} bottom wiggles, shape {}",
        index,
        points.len(),
        elements.len(),
        bottom_phase.count_wiggles,
        shape.label()
    );

    Ok(Dive {
        index,
        start_time: stats.start_time,
        end_time: stats.end_time,
        duration: stats.duration,
        max_depth: stats.max_depth,
        max_depth_time: stats.max_depth_time,
        ledge_depth: stats.ledge_depth,
        points,
        elements,
        bottom_phase,
        shape,
    })
}

/// Number of dives in each shape category.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, uniffi::Record,
)]
pub struct ShapeSummary {
    pub total: u32,
    pub v: u32,
    pub lower_u: u32,
    pub u: u32,
    pub w: u32,
    pub undefined: u32,
}

impl ShapeSummary {
    pub fn from_dives(dives: &[Dive]) -> Self {
        let mut summary = ShapeSummary::default();
        for dive in dives {
            summary.total += 1;
            match dive.shape {
                DiveShape::V => summary.v += 1,
                DiveShape::LowerU => summary.lower_u += 1,
                DiveShape::U => summary.u += 1,
                DiveShape::W => summary.w += 1,
                DiveShape::Undefined => summary.undefined += 1,
            }
        }
        summary
    }
}
