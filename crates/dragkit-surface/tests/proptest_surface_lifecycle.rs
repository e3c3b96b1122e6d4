//! Property-based lifecycle tests for the drag surface.
//!
//! 1. Arbitrary event sequences never panic and end idle after a cancel
//! 2. Transition ids strictly increase
//! 3. Committed orders are permutations of the registered ids
//! 4. Only one session exists at a time
//! 5. Column groups never exceed the ceiling, and every committed split
//!    matches `split_into_columns` on the rows it was dropped onto

use dragkit_core::geometry::{Axis, Point, Rect};
use dragkit_core::id::{ContainerId, ItemId};
use dragkit_reorder::{ColumnGroup, ColumnLimits, ColumnSplit, Row, split_into_columns};
use dragkit_surface::{CancelReason, DragCommit, DragPhase, DragSurface};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Down(usize, Point),
    Move(Point),
    Frame,
    Up(Point),
    Cancel,
    Leave,
}

fn point() -> impl Strategy<Value = Point> {
    (-50.0f32..500.0, -50.0f32..300.0).prop_map(|(x, y)| Point::new(x, y))
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => (0usize..8, point()).prop_map(|(i, p)| Op::Down(i, p)),
        4 => point().prop_map(Op::Move),
        2 => Just(Op::Frame),
        1 => point().prop_map(Op::Up),
        1 => Just(Op::Cancel),
        1 => Just(Op::Leave),
    ]
}

const NAMES: [&str; 6] = ["A", "B", "C", "P", "Q", "R"];

fn board() -> DragSurface {
    let mut surface = DragSurface::default();
    let registry = surface.registry_mut();
    for (column, x, names) in [("todo", 0.0, ["A", "B", "C"]), ("done", 200.0, ["P", "Q", "R"])] {
        registry.register_container(column, Rect::new(x, 0.0, 150.0, 200.0), Axis::Vertical);
        registry.set_accepts_columns(&ContainerId::from(column), column == "todo");
        for (i, name) in names.into_iter().enumerate() {
            registry.register_item(&ContainerId::from(column), name, Rect::new(x, i as f32 * 40.0, 150.0, 40.0));
        }
    }
    surface
}

fn all_ids(surface: &DragSurface) -> Vec<ItemId> {
    let mut ids: Vec<ItemId> = ["todo", "done"]
        .into_iter()
        .filter_map(|c| surface.registry().order(&ContainerId::from(c)))
        .flatten()
        .collect();
    ids.sort();
    ids
}

fn sorted(mut ids: Vec<ItemId>) -> Vec<ItemId> {
    ids.sort();
    ids
}

// ═══════════════════════════════════════════════════════════════════════
// Lifecycle
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arbitrary_sequences_keep_invariants(ops in prop::collection::vec(op(), 0..80)) {
        let mut surface = board();
        let expected_ids = all_ids(&surface);
        let mut last_id = 0;

        for op in &ops {
            let transition = match op {
                Op::Down(i, p) => {
                    let name = NAMES.get(*i).copied().unwrap_or("missing");
                    Some(surface.pointer_down(&ItemId::from(name), *p))
                }
                Op::Move(p) => {
                    surface.pointer_move(*p);
                    None
                }
                Op::Frame => Some(surface.animation_frame()),
                Op::Up(p) => Some(surface.pointer_up(*p)),
                Op::Cancel => Some(surface.cancel(CancelReason::Programmatic)),
                Op::Leave => Some(surface.pointer_leave()),
            };
            if let Some(transition) = transition {
                prop_assert!(transition.transition_id > last_id);
                last_id = transition.transition_id;
                prop_assert_eq!(transition.to == DragPhase::Idle, !surface.is_dragging());
                match transition.commit() {
                    Some(DragCommit::Reorder { order, .. }) => {
                        let unique: BTreeSet<&ItemId> = order.iter().collect();
                        prop_assert_eq!(unique.len(), order.len());
                    }
                    Some(DragCommit::Move { source_order, target_order, .. }) => {
                        let mut merged = source_order.clone();
                        merged.extend(target_order.iter().cloned());
                        prop_assert_eq!(sorted(merged), expected_ids.clone());
                    }
                    _ => {}
                }
            }
            // The registry never loses or duplicates an item.
            prop_assert_eq!(all_ids(&surface), expected_ids.clone());
        }

        surface.cancel(CancelReason::Programmatic);
        prop_assert!(!surface.is_dragging());
        prop_assert_eq!(surface.phase(), DragPhase::Idle);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Column groups
// ═══════════════════════════════════════════════════════════════════════

const LIST: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

/// One column-capable list, 400px wide so long drags stay horizontal.
fn column_list() -> DragSurface {
    let mut surface = DragSurface::default();
    let registry = surface.registry_mut();
    let list = ContainerId::from("list");
    registry.register_container("list", Rect::new(0.0, 0.0, 400.0, 360.0), Axis::Vertical);
    registry.set_accepts_columns(&list, true);
    for (i, name) in LIST.into_iter().enumerate() {
        registry.register_item(&list, name, Rect::new(0.0, i as f32 * 40.0, 400.0, 40.0));
    }
    surface
}

/// Row view of the list built from registry group membership.
fn rows(surface: &DragSurface) -> Vec<Row<ItemId>> {
    let mut rows: Vec<Row<ItemId>> = Vec::new();
    let Some(list) = surface.registry().container(&ContainerId::from("list")) else {
        return rows;
    };
    for item in list.items() {
        let existing = item.group.as_ref().and_then(|g| {
            rows.iter()
                .position(|row| matches!(row, Row::Columns(group) if &group.id == g))
        });
        match (item.group.as_ref(), existing) {
            (Some(_), Some(index)) => {
                if let Row::Columns(group) = &mut rows[index] {
                    group.columns.push(vec![item.id.clone()]);
                }
            }
            (Some(g), None) => rows.push(Row::Columns(ColumnGroup {
                id: g.clone(),
                columns: vec![vec![item.id.clone()]],
            })),
            (None, _) => rows.push(Row::Single(item.id.clone())),
        }
    }
    rows
}

fn column_op() -> impl Strategy<Value = Op> {
    let row_point = (0.0f32..400.0, 0.0f32..320.0).prop_map(|(x, y)| Point::new(x, y));
    prop_oneof![
        2 => (0usize..8, row_point.clone()).prop_map(|(i, p)| Op::Down(i, p)),
        3 => row_point.clone().prop_map(Op::Move),
        2 => Just(Op::Frame),
        2 => row_point.prop_map(Op::Up),
        1 => Just(Op::Cancel),
    ]
}

proptest! {
    #[test]
    fn column_groups_respect_the_ceiling(ops in prop::collection::vec(column_op(), 0..120)) {
        let mut surface = column_list();
        let limits = ColumnLimits::default();

        for op in &ops {
            let before = rows(&surface);
            let transition = match op {
                Op::Down(i, p) => surface.pointer_down(&ItemId::from(LIST[*i]), *p),
                Op::Move(p) => {
                    surface.pointer_move(*p);
                    continue;
                }
                Op::Frame => surface.animation_frame(),
                Op::Up(p) => surface.pointer_up(*p),
                Op::Cancel | Op::Leave => surface.cancel(CancelReason::Programmatic),
            };
            if let Some(DragCommit::ColumnSplit { source, target, edge, rows: after, .. }) = transition.commit() {
                let expected = split_into_columns(&before, source, target, *edge, limits);
                prop_assert_eq!(expected, ColumnSplit::Applied(after.clone()));
            }
            for row in rows(&surface) {
                if let Row::Columns(group) = row {
                    prop_assert!(group.column_count() <= limits.max);
                    prop_assert!(group.column_count() >= limits.min);
                }
            }
        }
    }
}
