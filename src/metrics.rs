//! Per-dive descriptive statistics and vertical velocity.
//!
//! Pure functions over a dive's own samples. Nothing here looks beyond the
//! dive it is given, so dives can be processed independently.

use crate::error::AnalysisError;
use crate::models::{Point, Sample};

/// Scalar summary of a dive's raw samples.
#[derive(Debug, Clone, PartialEq)]
pub struct DiveStats {
    /// Time of the first sample
    pub start_time: f64,
    /// Time of the last sample
    pub end_time: f64,
    pub duration: f64,
    /// Deepest reading
    pub max_depth: f64,
    /// Time of the earliest sample at `max_depth`
    pub max_depth_time: f64,
    /// `max_depth * ledge_fraction`
    pub ledge_depth: f64,
}

impl DiveStats {
    pub fn compute(samples: &[Sample], ledge_fraction: f64) -> Self {
        let (first, last) = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Self::empty(),
        };

        let mut max_depth = first.depth;
        let mut max_depth_time = first.time;
        for sample in &samples[1..] {
            // strict comparison keeps the earliest sample on ties
            if sample.depth > max_depth {
                max_depth = sample.depth;
                max_depth_time = sample.time;
            }
        }

        DiveStats {
            start_time: first.time,
            end_time: last.time,
            duration: last.time - first.time,
            max_depth,
            max_depth_time,
            ledge_depth: max_depth * ledge_fraction,
        }
    }

    fn empty() -> Self {
        DiveStats {
            start_time: 0.0,
            end_time: 0.0,
            duration: 0.0,
            max_depth: 0.0,
            max_depth_time: 0.0,
            ledge_depth: 0.0,
        }
    }
}

/// Forward-difference vertical velocity for every sample of dive `index`.
///
/// The last sample has no successor and gets a velocity of 0. Fails if the
/// time does not strictly increase between two consecutive samples.
pub fn vertical_velocities(
    index: u32,
    samples: &[Sample],
) -> Result<Vec<Point>, AnalysisError> {
    let mut points = Vec::with_capacity(samples.len());

    for (i, sample) in samples.iter().enumerate() {
        let vertical_velocity = match samples.get(i + 1) {
            Some(next) => {
                let dt = next.time - sample.time;
                if !(dt > 0.0) {
                    return Err(AnalysisError::DegenerateTimestamp {
                        index,
                        time: sample.time,
                    });
                }
                (next.depth - sample.depth) / dt
            }
            None => 0.0,
        };

        points.push(Point {
            time: sample.time,
            depth: sample.depth,
            vertical_velocity,
            phase: None,
        });
    }

    Ok(points)
}
