#![forbid(unsafe_code)]

//! Drag-direction classification.
//!
//! A drag is classified from its total displacement since drag start:
//!
//! - While both `|Δx|` and `|Δy|` are below the threshold the drag is in the
//!   dead zone and has no direction.
//! - Otherwise it is [`DragDirection::Horizontal`] when `|Δx| > |Δy|` and
//!   [`DragDirection::Vertical`] otherwise. A tie resolves to vertical.
//!
//! Classification is recomputed for every processed sample and may flip
//! before the drop if the relative deltas invert.

use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, Point};

/// Default dead-zone radius in pixels.
pub const DEFAULT_DIRECTION_THRESHOLD: f32 = 30.0;

/// Intent of an in-progress drag, derived from displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragDirection {
    /// Reorder along a vertical list.
    Vertical,
    /// Side-by-side intent (column split in vertical lists).
    Horizontal,
}

impl DragDirection {
    /// The layout axis this direction moves along.
    #[inline]
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Vertical => Axis::Vertical,
            Self::Horizontal => Axis::Horizontal,
        }
    }
}

/// Which classifications a drag surface allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisRestriction {
    /// Only vertically classified drags.
    Vertical,
    /// Only horizontally classified drags.
    Horizontal,
    /// Either, by dominant displacement.
    #[default]
    Both,
}

/// Classify displacement from `start` to `current`.
///
/// Returns `None` while both displacement components are below `threshold`.
#[must_use]
pub fn classify(start: Point, current: Point, threshold: f32) -> Option<DragDirection> {
    let (dx, dy) = current.abs_delta(start);
    if dx < threshold && dy < threshold {
        return None;
    }
    if dx > dy {
        Some(DragDirection::Horizontal)
    } else {
        Some(DragDirection::Vertical)
    }
}

/// A configured classifier: threshold plus axis restriction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionClassifier {
    pub threshold: f32,
    pub axis: AxisRestriction,
}

impl Default for DirectionClassifier {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DIRECTION_THRESHOLD,
            axis: AxisRestriction::Both,
        }
    }
}

impl DirectionClassifier {
    #[must_use]
    pub const fn new(threshold: f32, axis: AxisRestriction) -> Self {
        Self { threshold, axis }
    }

    /// Classify, then clamp the result to the allowed axis.
    ///
    /// A restricted classifier still honors the dead zone; once outside it,
    /// the drag always reports the allowed direction.
    #[must_use]
    pub fn classify(&self, start: Point, current: Point) -> Option<DragDirection> {
        let natural = classify(start, current, self.threshold)?;
        Some(match self.axis {
            AxisRestriction::Vertical => DragDirection::Vertical,
            AxisRestriction::Horizontal => DragDirection::Horizontal,
            AxisRestriction::Both => natural,
        })
    }
}
