#![forbid(unsafe_code)]

//! Drop-indicator projection.
//!
//! [`project`] turns the live session and its latest hit into a
//! [`DropIndicator`]: a thin rectangle the host draws where the drop would
//! land. It never touches a render tree and holds no state.

use dragkit_core::direction::DragDirection;
use dragkit_core::geometry::{Axis, Edge, Rect};
use dragkit_layout::HitTarget;
use serde::{Deserialize, Serialize};

use crate::session::DragSession;

/// What a drop at the current position would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropIntent {
    /// Insert before or after the target in its container.
    Reorder,
    /// Place the source in a new column beside the target.
    ColumnSplit,
}

impl DropIntent {
    /// Intent for a drag classified as `direction` over `hit`.
    ///
    /// Perpendicular drags over a target item in a column-capable container
    /// split into columns; everything else reorders.
    #[must_use]
    pub fn resolve(direction: Option<DragDirection>, hit: &HitTarget) -> Self {
        match direction {
            Some(direction)
                if direction.axis() != hit.axis && hit.accepts_columns && hit.item_id.is_some() =>
            {
                Self::ColumnSplit
            }
            _ => Self::Reorder,
        }
    }
}

/// Direction of the drawn indicator line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorOrientation {
    /// A horizontal line (between vertically stacked items).
    Horizontal,
    /// A vertical line (between side-by-side items or columns).
    Vertical,
}

/// Visual parameters of the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorStyle {
    /// Line thickness in pixels; the line is centered on the drop edge.
    pub thickness: f32,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            thickness: dragkit_core::config::DEFAULT_INDICATOR_THICKNESS,
        }
    }
}

/// Render-only description of where a drop would land.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropIndicator {
    pub rect: Rect,
    pub orientation: IndicatorOrientation,
    pub intent: DropIntent,
}

/// Project the indicator for `session` over `hit`.
///
/// Returns `None` without a hit, or when the hit would target the dragged
/// item itself.
#[must_use]
pub fn project(session: &DragSession, hit: Option<&HitTarget>, style: IndicatorStyle) -> Option<DropIndicator> {
    let hit = hit?;
    if hit.item_id.as_ref() == Some(&session.source_id) {
        return None;
    }
    let Some(item_rect) = hit.item_rect else {
        // Empty container: line across its start.
        let (rect, orientation) = line_across(hit.container_rect, hit.axis, Edge::Before, style.thickness);
        return Some(DropIndicator {
            rect,
            orientation,
            intent: DropIntent::Reorder,
        });
    };

    let intent = DropIntent::resolve(session.direction, hit);
    let (rect, orientation) = match intent {
        DropIntent::Reorder => line_across(item_rect, hit.axis, hit.edge, style.thickness),
        DropIntent::ColumnSplit => line_across(item_rect, hit.axis.cross(), hit.cross_edge, style.thickness),
    };
    Some(DropIndicator {
        rect,
        orientation,
        intent,
    })
}

/// A line crossing `axis` at the `edge` side of `rect`.
fn line_across(rect: Rect, axis: Axis, edge: Edge, thickness: f32) -> (Rect, IndicatorOrientation) {
    let half = thickness / 2.0;
    match axis {
        Axis::Vertical => {
            let y = match edge {
                Edge::Before => rect.top(),
                Edge::After => rect.bottom(),
            };
            (
                Rect::new(rect.x, y - half, rect.width, thickness),
                IndicatorOrientation::Horizontal,
            )
        }
        Axis::Horizontal => {
            let x = match edge {
                Edge::Before => rect.left(),
                Edge::After => rect.right(),
            };
            (
                Rect::new(x - half, rect.y, thickness, rect.height),
                IndicatorOrientation::Vertical,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragkit_core::geometry::Point;
    use dragkit_core::id::{ContainerId, ItemId};

    fn session(direction: Option<DragDirection>) -> DragSession {
        let mut session = DragSession::new(ItemId::from("A"), ContainerId::from("list"), Point::new(0.0, 0.0));
        session.direction = direction;
        session
    }

    fn hit(axis: Axis, edge: Edge, cross_edge: Edge, accepts_columns: bool) -> HitTarget {
        HitTarget {
            container_id: ContainerId::from("list"),
            container_rect: Rect::new(0.0, 0.0, 100.0, 100.0),
            axis,
            accepts_columns,
            item_id: Some(ItemId::from("B")),
            item_rect: Some(Rect::new(10.0, 20.0, 80.0, 20.0)),
            item_group: None,
            item_columns: 1,
            edge,
            cross_edge,
            index: 1,
        }
    }

    const STYLE: IndicatorStyle = IndicatorStyle { thickness: 2.0 };

    #[test]
    fn vertical_reorder_draws_horizontal_line_at_edge() {
        let target = hit(Axis::Vertical, Edge::After, Edge::Before, false);
        let indicator = project(&session(Some(DragDirection::Vertical)), Some(&target), STYLE).expect("target");
        assert_eq!(indicator.intent, DropIntent::Reorder);
        assert_eq!(indicator.orientation, IndicatorOrientation::Horizontal);
        assert_eq!(indicator.rect, Rect::new(10.0, 39.0, 80.0, 2.0));
    }

    #[test]
    fn undecided_direction_reorders() {
        let target = hit(Axis::Vertical, Edge::Before, Edge::After, true);
        let indicator = project(&session(None), Some(&target), STYLE).expect("target");
        assert_eq!(indicator.intent, DropIntent::Reorder);
        assert_eq!(indicator.rect, Rect::new(10.0, 19.0, 80.0, 2.0));
    }

    #[test]
    fn perpendicular_drag_splits_columns_at_cross_edge() {
        let target = hit(Axis::Vertical, Edge::Before, Edge::After, true);
        let indicator = project(&session(Some(DragDirection::Horizontal)), Some(&target), STYLE).expect("target");
        assert_eq!(indicator.intent, DropIntent::ColumnSplit);
        assert_eq!(indicator.orientation, IndicatorOrientation::Vertical);
        assert_eq!(indicator.rect, Rect::new(89.0, 20.0, 2.0, 20.0));
    }

    #[test]
    fn perpendicular_drag_without_column_support_reorders() {
        let target = hit(Axis::Vertical, Edge::Before, Edge::After, false);
        let indicator = project(&session(Some(DragDirection::Horizontal)), Some(&target), STYLE).expect("target");
        assert_eq!(indicator.intent, DropIntent::Reorder);
        assert_eq!(indicator.orientation, IndicatorOrientation::Horizontal);
    }

    #[test]
    fn horizontal_container_reorder_draws_vertical_line() {
        let target = hit(Axis::Horizontal, Edge::Before, Edge::Before, false);
        let indicator = project(&session(Some(DragDirection::Horizontal)), Some(&target), STYLE).expect("target");
        assert_eq!(indicator.orientation, IndicatorOrientation::Vertical);
        assert_eq!(indicator.rect, Rect::new(9.0, 20.0, 2.0, 20.0));
    }

    #[test]
    fn empty_container_line_at_start() {
        let mut target = hit(Axis::Vertical, Edge::Before, Edge::Before, true);
        target.item_id = None;
        target.item_rect = None;
        let indicator = project(&session(Some(DragDirection::Horizontal)), Some(&target), STYLE).expect("target");
        assert_eq!(indicator.intent, DropIntent::Reorder);
        assert_eq!(indicator.rect, Rect::new(0.0, -1.0, 100.0, 2.0));
    }

    #[test]
    fn no_hit_no_indicator() {
        assert_eq!(project(&session(None), None, STYLE), None);
    }

    #[test]
    fn self_target_no_indicator() {
        let mut target = hit(Axis::Vertical, Edge::Before, Edge::Before, false);
        target.item_id = Some(ItemId::from("A"));
        assert_eq!(project(&session(None), Some(&target), STYLE), None);
    }
}
