use serde::{Deserialize, Serialize};

use crate::bottom::{self, BottomInterval};

/// A raw time-depth recorder reading.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct Sample {
    pub time: f64,
    pub depth: f64,
}

impl Sample {
    pub fn new(time: f64, depth: f64) -> Self {
        Self { time, depth }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Descent,
    Bottom,
    Ascent,
}

/// A dive sample extended with its derived vertical velocity and phase.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct Point {
    pub time: f64,
    pub depth: f64,
    pub vertical_velocity: f64,
    pub phase: Option<Phase>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Wiggle,
    Step,
}

/// A sub-dive kinematic feature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct Element {
    pub kind: ElementKind,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub min_depth: f64,
    pub max_depth: f64,
    pub depth_range: f64,
}

impl Element {
    /// Build an element from the points it spans. Returns `None` for an empty span.
    pub fn from_points(kind: ElementKind, points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let last = points.last()?;

        let mut min_depth = f64::INFINITY;
        let mut max_depth = f64::NEG_INFINITY;
        for point in points {
            min_depth = min_depth.min(point.depth);
            max_depth = max_depth.max(point.depth);
        }

        Some(Element {
            kind,
            start_time: first.time,
            end_time: last.time,
            duration: last.time - first.time,
            min_depth,
            max_depth,
            depth_range: max_depth - min_depth,
        })
    }

    pub fn is_wiggle(&self) -> bool {
        self.kind == ElementKind::Wiggle
    }

    /// Whether the element lies entirely within `[start, end]`.
    pub fn within(&self, start: f64, end: f64) -> bool {
        self.start_time >= start && self.end_time <= end
    }
}

/// Bottom-phase quantities and the shape indices derived from them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct BottomPhase {
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub depth_range: f64,
    pub count_wiggles: u32,
    pub broadness_idx: f64,
    pub depth_range_idx: f64,
    pub symmetry_idx: f64,
    pub raggedness_idx: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
pub enum DiveShape {
    #[serde(rename = "V")]
    V,
    #[serde(rename = "u")]
    LowerU,
    #[serde(rename = "U")]
    U,
    #[serde(rename = "W")]
    W,
    #[serde(rename = "undefined")]
    Undefined,
}

impl DiveShape {
    pub fn label(&self) -> &'static str {
        match self {
            DiveShape::V => "V",
            DiveShape::LowerU => "u",
            DiveShape::U => "U",
            DiveShape::W => "W",
            DiveShape::Undefined => "undefined",
        }
    }
}

/// A fully analysed dive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct Dive {
    pub index: u32,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub max_depth: f64,
    pub max_depth_time: f64,
    pub ledge_depth: f64,
    pub points: Vec<Point>,
    pub elements: Vec<Element>,
    pub bottom_phase: BottomPhase,
    pub shape: DiveShape,
}

impl Dive {
    /// Elements of the given kind, in detection order.
    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.kind == kind)
    }

    /// Wiggles fully contained in the bottom phase.
    pub fn bottom_wiggles(&self) -> Vec<&Element> {
        let interval = BottomInterval {
            start_time: self.bottom_phase.start_time,
            end_time: self.bottom_phase.end_time,
        };
        bottom::bottom_wiggles(&self.elements, &interval)
    }
}
