//! Dive shape classification.
//!
//! Rules are checked in a fixed order and the first match wins:
//!
//! 1. `V` when the bottom phase is narrow (`broadness_idx < threshold`)
//! 2. `u` with exactly one bottom wiggle
//! 3. `U` with two or more bottom wiggles
//! 4. `W` when a bottom wiggle stays shallower than ledge depth
//! 5. `undefined` otherwise
//!
//! Rule 4 can only hold when there is a bottom wiggle, which rules 2 and 3
//! already claim, so `W` is never produced from a consistent dive.

use crate::models::{BottomPhase, DiveShape, Element};

pub fn classify(
    bottom: &BottomPhase,
    bottom_wiggles: &[&Element],
    ledge_depth: f64,
    broadness_threshold: f64,
) -> DiveShape {
    if bottom.broadness_idx < broadness_threshold {
        return DiveShape::V;
    }

    match bottom_wiggles.len() {
        1 => DiveShape::LowerU,
        n if n >= 2 => DiveShape::U,
        _ if bottom_wiggles.iter().any(|w| w.max_depth < ledge_depth) => DiveShape::W,
        _ => DiveShape::Undefined,
    }
}
