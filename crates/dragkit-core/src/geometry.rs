#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are host pixels (`f32`, origin at top-left, y grows down).

use serde::{Deserialize, Serialize};

/// A pointer position in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Absolute displacement `(|Δx|, |Δy|)` from `origin` to `self`.
    #[inline]
    #[must_use]
    pub fn abs_delta(self, origin: Self) -> (f32, f32) {
        ((self.x - origin.x).abs(), (self.y - origin.y).abs())
    }

    /// Coordinate along `axis`.
    #[inline]
    #[must_use]
    pub const fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.y,
            Axis::Horizontal => self.x,
        }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Layout axis of a container: the direction its items flow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Items stacked top to bottom (block lists, kanban columns).
    #[default]
    Vertical,
    /// Items laid out left to right (tabs, column groups).
    Horizontal,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

/// Which side of a target item a drop inserts relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Before,
    After,
}

/// An axis-aligned rectangle used for registered geometry and indicators.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle (right/bottom exclusive).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Start coordinate along `axis`.
    #[inline]
    pub const fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.y,
            Axis::Horizontal => self.x,
        }
    }

    /// End coordinate (exclusive) along `axis`.
    #[inline]
    pub fn end(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.bottom(),
            Axis::Horizontal => self.right(),
        }
    }

    /// Extent along `axis`.
    #[inline]
    pub const fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }

    /// Midpoint along `axis`.
    #[inline]
    pub fn midpoint(&self, axis: Axis) -> f32 {
        self.start(axis) + self.extent(axis) / 2.0
    }

    /// Whether `coord` falls in `[start, end)` along `axis`.
    #[inline]
    pub fn spans(&self, axis: Axis, coord: f32) -> bool {
        coord >= self.start(axis) && coord < self.end(axis)
    }

    /// Distance from `coord` to the span on `axis` (0 when inside).
    #[inline]
    pub fn distance_along(&self, axis: Axis, coord: f32) -> f32 {
        let start = self.start(axis);
        let end = self.end(axis);
        if coord < start {
            start - coord
        } else if coord >= end {
            coord - end
        } else {
            0.0
        }
    }

    /// Which half of the rectangle `coord` falls in along `axis`.
    ///
    /// The midpoint itself belongs to the second half.
    #[inline]
    pub fn edge_at(&self, axis: Axis, coord: f32) -> Edge {
        if coord < self.midpoint(axis) {
            Edge::Before
        } else {
            Edge::After
        }
    }

    /// Create a new rectangle that is the union of this rectangle and another.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}
