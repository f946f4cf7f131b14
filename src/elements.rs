//! Wiggle and step detection from the vertical velocity signal.
//!
//! # Wiggles
//!
//! Points with a nonzero velocity are grouped into maximal runs of the same
//! sign. The first run is discarded: it carries a reversal that started
//! before the dive could be observed. A window of three runs then slides
//! over the rest with a stride of two, so consecutive windows share a run.
//! For a window `(a, b, c)` the wiggle spans every point of `a` and `b` and
//! the first point of `c`, which covers both dips (`-, +, -`) and peaks
//! (`+, -, +`).
//!
//! # Steps
//!
//! Every point (zero velocities included) is flagged when
//! `0 < velocity < max_step_velocity`. A maximal run of flagged points at
//! least `min_step_points` long is a step.

use crate::models::{Element, ElementKind, Point};

const WINDOW_RUNS: usize = 3;
const WINDOW_STRIDE: usize = 2;

/// Split `items` into maximal runs sharing the same key.
fn runs_by<T: Copy, K: PartialEq>(items: &[T], key: impl Fn(&T) -> K) -> Vec<(K, Vec<T>)> {
    let mut runs: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(item);
        match runs.last_mut() {
            Some((current, run)) if *current == k => run.push(*item),
            _ => runs.push((k, vec![*item])),
        }
    }
    runs
}

/// Wiggles in chronological order.
pub fn detect_wiggles(points: &[Point]) -> Vec<Element> {
    let moving: Vec<Point> = points
        .iter()
        .filter(|p| p.vertical_velocity != 0.0)
        .copied()
        .collect();

    let runs = runs_by(&moving, |p| p.vertical_velocity > 0.0);
    if runs.len() <= WINDOW_RUNS {
        return Vec::new();
    }
    let runs = &runs[1..];

    let mut wiggles = Vec::new();
    let mut i = 0;
    while i + WINDOW_RUNS <= runs.len() {
        let (_, a) = &runs[i];
        let (_, b) = &runs[i + 1];
        let (_, c) = &runs[i + 2];

        let mut span: Vec<Point> = Vec::with_capacity(a.len() + b.len() + 1);
        span.extend_from_slice(a);
        span.extend_from_slice(b);
        span.extend(c.first().copied());

        if let Some(wiggle) = Element::from_points(ElementKind::Wiggle, &span) {
            wiggles.push(wiggle);
        }
        i += WINDOW_STRIDE;
    }

    wiggles
}

/// Steps in chronological order.
pub fn detect_steps(
    points: &[Point],
    max_step_velocity: f64,
    min_step_points: usize,
) -> Vec<Element> {
    runs_by(points, |p| {
        p.vertical_velocity > 0.0 && p.vertical_velocity < max_step_velocity
    })
    .into_iter()
    .filter(|(slow, run)| *slow && run.len() >= min_step_points)
    .filter_map(|(_, run)| Element::from_points(ElementKind::Step, &run))
    .collect()
}

/// All elements of a dive: wiggles followed by steps.
pub fn detect_elements(
    points: &[Point],
    max_step_velocity: f64,
    min_step_points: usize,
) -> Vec<Element> {
    let mut elements = detect_wiggles(points);
    elements.extend(detect_steps(points, max_step_velocity, min_step_points));
    elements
}
