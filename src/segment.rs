//! Splitting a raw record into surface and submerged runs.

use crate::models::Sample;

/// A maximal run of samples on one side of the surface threshold.
///
/// Surface runs carry negative indices (`-1, -2, ...`) and submerged runs
/// positive ones (`1, 2, ...`), each numbered in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub index: i32,
    pub samples: Vec<Sample>,
}

impl Run {
    pub fn is_dive(&self) -> bool {
        self.index > 0
    }

    /// The dive number of a submerged run.
    pub fn dive_index(&self) -> Option<u32> {
        self.is_dive().then_some(self.index as u32)
    }
}

/// Partition `samples` into alternating surface and submerged runs.
///
/// Samples before the first surface reading are dropped, since a profile
/// has to start at the surface for its first dive to be complete.
pub fn segment(samples: &[Sample], min_depth: f64) -> Vec<Run> {
    let at_surface = |s: &Sample| s.depth < min_depth;

    let start = match samples.iter().position(at_surface) {
        Some(start) => start,
        None => return Vec::new(),
    };

    let mut runs: Vec<Run> = Vec::new();
    let mut surface_count = 0;
    let mut dive_count = 0;

    for sample in &samples[start..] {
        let surface = at_surface(sample);
        match runs.last_mut() {
            Some(run) if (run.index < 0) == surface => run.samples.push(*sample),
            _ => {
                let index = if surface {
                    surface_count += 1;
                    -surface_count
                } else {
                    dive_count += 1;
                    dive_count
                };
                runs.push(Run {
                    index,
                    samples: vec![*sample],
                });
            }
        }
    }

    runs
}

/// Submerged runs only, as `(dive index, samples)` in chronological order.
pub fn dives(samples: &[Sample], min_depth: f64) -> Vec<(u32, Vec<Sample>)> {
    segment(samples, min_depth)
        .into_iter()
        .filter_map(|run| Some((run.dive_index()?, run.samples)))
        .collect()
}
