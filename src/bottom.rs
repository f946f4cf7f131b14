//! Bottom phase: where it is, which points belong to it, and its shape indices.

use crate::metrics::DiveStats;
use crate::models::{BottomPhase, Element, Phase, Point};

/// Time bounds of a dive's bottom phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BottomInterval {
    pub start_time: f64,
    pub end_time: f64,
}

impl BottomInterval {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn contains(&self, element: &Element) -> bool {
        element.within(self.start_time, self.end_time)
    }
}

/// Bound the bottom phase by the elements that reach ledge depth.
///
/// Bounds are the earliest start and latest end among those elements, taken
/// by value since wiggles and steps are not interleaved chronologically. With
/// no such element the bottom phase collapses onto the time of max depth.
pub fn locate(stats: &DiveStats, elements: &[Element]) -> BottomInterval {
    let mut interval: Option<BottomInterval> = None;

    for element in elements.iter().filter(|e| e.max_depth >= stats.ledge_depth) {
        interval = Some(match interval {
            None => BottomInterval {
                start_time: element.start_time,
                end_time: element.end_time,
            },
            Some(current) => BottomInterval {
                start_time: current.start_time.min(element.start_time),
                end_time: current.end_time.max(element.end_time),
            },
        });
    }

    interval.unwrap_or(BottomInterval {
        start_time: stats.max_depth_time,
        end_time: stats.max_depth_time,
    })
}

/// Copy `points` with each one tagged descent, bottom or ascent.
pub fn label_phases(points: &[Point], bottom: &BottomInterval) -> Vec<Point> {
    points
        .iter()
        .map(|p| {
            let phase = if p.time < bottom.start_time {
                Phase::Descent
            } else if p.time > bottom.end_time {
                Phase::Ascent
            } else {
                Phase::Bottom
            };
            Point {
                phase: Some(phase),
                ..*p
            }
        })
        .collect()
}

/// Wiggles fully contained in the bottom phase.
pub fn bottom_wiggles<'a>(elements: &'a [Element], bottom: &BottomInterval) -> Vec<&'a Element> {
    elements
        .iter()
        .filter(|e| e.is_wiggle() && bottom.contains(e))
        .collect()
}

/// Depth range of the points labelled bottom, 0 if there are none.
pub fn bottom_depth_range(points: &[Point]) -> f64 {
    let mut min_depth = f64::INFINITY;
    let mut max_depth = f64::NEG_INFINITY;
    for point in points.iter().filter(|p| p.phase == Some(Phase::Bottom)) {
        min_depth = min_depth.min(point.depth);
        max_depth = max_depth.max(point.depth);
    }

    if max_depth >= min_depth {
        max_depth - min_depth
    } else {
        0.0
    }
}

/// Broadness, depth range, symmetry and raggedness of a bottom phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeIndices {
    pub broadness: f64,
    pub depth_range: f64,
    pub symmetry: f64,
    pub raggedness: f64,
}

impl ShapeIndices {
    pub fn compute(
        stats: &DiveStats,
        bottom: &BottomInterval,
        bottom_depth_range: f64,
        wiggles: &[&Element],
    ) -> Self {
        let bottom_duration = bottom.duration();

        let broadness = if stats.duration > 0.0 {
            bottom_duration / stats.duration
        } else {
            0.0
        };
        let depth_range = if stats.max_depth > 0.0 {
            bottom_depth_range / stats.max_depth
        } else {
            0.0
        };
        let symmetry = if bottom_duration > 0.0 {
            (stats.max_depth_time - bottom.start_time) / bottom_duration
        } else {
            0.0
        };
        let raggedness = wiggles.iter().map(|w| w.depth_range).sum::<f64>();

        ShapeIndices {
            broadness,
            depth_range,
            symmetry,
            raggedness,
        }
    }
}

/// Quantify the bottom phase of a labelled dive.
pub fn quantify(
    stats: &DiveStats,
    bottom: &BottomInterval,
    labelled: &[Point],
    elements: &[Element],
) -> BottomPhase {
    let wiggles = bottom_wiggles(elements, bottom);
    let depth_range = bottom_depth_range(labelled);
    let indices = ShapeIndices::compute(stats, bottom, depth_range, &wiggles);

    BottomPhase {
        start_time: bottom.start_time,
        end_time: bottom.end_time,
        duration: bottom.duration(),
        depth_range,
        count_wiggles: wiggles.len() as u32,
        broadness_idx: indices.broadness,
        depth_range_idx: indices.depth_range,
        symmetry_idx: indices.symmetry,
        raggedness_idx: indices.raggedness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ElementKind;

    fn stats(duration: f64, max_depth: f64, max_depth_time: f64) -> DiveStats {
        DiveStats {
            start_time: 0.0,
            end_time: duration,
            duration,
            max_depth,
            max_depth_time,
            ledge_depth: max_depth * 0.75,
        }
    }

    fn element(kind: ElementKind, start: f64, end: f64, min: f64, max: f64) -> Element {
        Element {
            kind,
            start_time: start,
            end_time: end,
            duration: end - start,
            min_depth: min,
            max_depth: max,
            depth_range: max - min,
        }
    }

    fn point(time: f64, depth: f64) -> Point {
        Point {
            time,
            depth,
            vertical_velocity: 0.0,
            phase: None,
        }
    }

    #[test]
    fn test_locate_without_deep_elements() {
        let s = stats(10.0, 20.0, 4.0);
        let shallow = vec![element(ElementKind::Wiggle, 1.0, 3.0, 5.0, 10.0)];

        let bottom = locate(&s, &shallow);
        assert_eq!(bottom.start_time, 4.0);
        assert_eq!(bottom.end_time, 4.0);
        assert_eq!(bottom.duration(), 0.0);
    }

    #[test]
    fn test_locate_uses_min_start_and_max_end_by_value() {
        let s = stats(100.0, 20.0, 50.0);
        // wiggles first, then steps: not chronological across kinds
        let elements = vec![
            element(ElementKind::Wiggle, 40.0, 45.0, 16.0, 19.0),
            element(ElementKind::Wiggle, 60.0, 70.0, 17.0, 20.0),
            element(ElementKind::Wiggle, 80.0, 90.0, 2.0, 6.0),
            element(ElementKind::Step, 20.0, 30.0, 14.0, 15.0),
            element(ElementKind::Step, 72.0, 78.0, 15.0, 18.0),
        ];

        let bottom = locate(&s, &elements);
        assert_eq!(bottom.start_time, 20.0);
        assert_eq!(bottom.end_time, 78.0);
        assert_eq!(bottom.duration(), 58.0);
    }

    #[test]
    fn test_locate_includes_element_at_ledge_depth() {
        let s = stats(10.0, 4.0, 8.0);
        assert_eq!(s.ledge_depth, 3.0);
        let elements = vec![
            element(ElementKind::Wiggle, 1.0, 2.0, 1.0, 2.9),
            element(ElementKind::Wiggle, 3.0, 5.0, 2.0, 3.0),
            element(ElementKind::Wiggle, 6.0, 8.0, 3.0, 4.0),
        ];

        let bottom = locate(&s, &elements);
        assert_eq!(bottom.start_time, 3.0);
        assert_eq!(bottom.end_time, 8.0);
    }

    #[test]
    fn test_label_phases() {
        let points: Vec<Point> = (0..6).map(|t| point(t as f64, 1.0)).collect();
        let bottom = BottomInterval {
            start_time: 2.0,
            end_time: 3.0,
        };

        let labelled = label_phases(&points, &bottom);
        let phases: Vec<Option<Phase>> = labelled.iter().map(|p| p.phase).collect();
        assert_eq!(
            phases,
            vec![
                Some(Phase::Descent),
                Some(Phase::Descent),
                Some(Phase::Bottom),
                Some(Phase::Bottom),
                Some(Phase::Ascent),
                Some(Phase::Ascent),
            ]
        );
        // input is left untouched
        assert!(points.iter().all(|p| p.phase.is_none()));
    }

    #[test]
    fn test_bottom_wiggles_must_be_fully_contained() {
        let bottom = BottomInterval {
            start_time: 10.0,
            end_time: 20.0,
        };
        let elements = vec![
            element(ElementKind::Wiggle, 10.0, 14.0, 1.0, 2.0),
            element(ElementKind::Wiggle, 18.0, 21.0, 1.0, 2.0),
            element(ElementKind::Step, 12.0, 16.0, 1.0, 2.0),
            element(ElementKind::Wiggle, 15.0, 20.0, 1.0, 3.0),
        ];

        let wiggles = bottom_wiggles(&elements, &bottom);
        let starts: Vec<f64> = wiggles.iter().map(|w| w.start_time).collect();
        assert_eq!(starts, vec![10.0, 15.0]);
    }

    #[test]
    fn test_bottom_depth_range() {
        let points = vec![point(0.0, 1.0), point(1.0, 6.0), point(2.0, 4.0), point(3.0, 1.0)];
        let bottom = BottomInterval {
            start_time: 1.0,
            end_time: 2.0,
        };
        let labelled = label_phases(&points, &bottom);
        assert_eq!(bottom_depth_range(&labelled), 2.0);

        assert_eq!(bottom_depth_range(&points), 0.0);
    }

    #[test]
    fn test_shape_indices() {
        let s = stats(100.0, 20.0, 40.0);
        let bottom = BottomInterval {
            start_time: 20.0,
            end_time: 70.0,
        };
        let w1 = element(ElementKind::Wiggle, 25.0, 30.0, 17.0, 19.5);
        let w2 = element(ElementKind::Wiggle, 50.0, 60.0, 16.0, 20.0);

        let idx = ShapeIndices::compute(&s, &bottom, 5.0, &[&w1, &w2]);
        assert!((idx.broadness - 0.5).abs() < 1e-12);
        assert!((idx.depth_range - 0.25).abs() < 1e-12);
        assert!((idx.symmetry - 0.4).abs() < 1e-12);
        assert!((idx.raggedness - 6.5).abs() < 1e-12);
    }

    #[test]
    fn test_shape_indices_zero_duration_guards() {
        let s = stats(0.0, 3.0, 0.0);
        let bottom = BottomInterval {
            start_time: 0.0,
            end_time: 0.0,
        };

        let idx = ShapeIndices::compute(&s, &bottom, 0.0, &[]);
        assert_eq!(idx.broadness, 0.0);
        assert_eq!(idx.depth_range, 0.0);
        assert_eq!(idx.symmetry, 0.0);
        assert_eq!(idx.raggedness, 0.0);
    }

    #[test]
    fn test_quantify() {
        let s = stats(6.0, 10.0, 3.0);
        let points = vec![
            point(0.0, 2.0),
            point(1.0, 8.0),
            point(2.0, 9.0),
            point(3.0, 10.0),
            point(4.0, 8.5),
            point(5.0, 4.0),
            point(6.0, 1.0),
        ];
        let elements = vec![element(ElementKind::Wiggle, 2.0, 4.0, 8.5, 10.0)];
        let bottom = locate(&s, &elements);
        let labelled = label_phases(&points, &bottom);

        let phase = quantify(&s, &bottom, &labelled, &elements);
        assert_eq!(phase.start_time, 2.0);
        assert_eq!(phase.end_time, 4.0);
        assert_eq!(phase.duration, 2.0);
        assert_eq!(phase.depth_range, 1.5);
        assert_eq!(phase.count_wiggles, 1);
        assert!((phase.broadness_idx - 2.0 / 6.0).abs() < 1e-12);
        assert!((phase.depth_range_idx - 0.15).abs() < 1e-12);
        assert!((phase.symmetry_idx - 0.5).abs() < 1e-12);
        assert!((phase.raggedness_idx - 1.5).abs() < 1e-12);
    }
}
