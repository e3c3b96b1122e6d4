#![no_main]

use std::collections::BTreeSet;

use arbitrary::Arbitrary;
use dragkit_core::geometry::{Axis, Point, Rect};
use dragkit_core::id::{ContainerId, ItemId};
use dragkit_surface::{CancelReason, DragSurface};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Down { item: u8, x: i16, y: i16 },
    Move { x: i16, y: i16 },
    Frame,
    Up { x: i16, y: i16 },
    Leave,
    Escape,
    ToggleColumns { container: bool },
}

#[derive(Debug, Arbitrary)]
struct Input {
    left_rows: u8,
    right_rows: u8,
    ops: Vec<Op>,
}

fn point(x: i16, y: i16) -> Point {
    Point::new(f32::from(x), f32::from(y))
}

fuzz_target!(|input: Input| {
    let mut surface = DragSurface::default();
    let containers = [ContainerId::from("left"), ContainerId::from("right")];
    let mut all = BTreeSet::new();
    {
        let registry = surface.registry_mut();
        for (c, (container, rows)) in containers.iter().zip([input.left_rows, input.right_rows]).enumerate() {
            let x = c as f32 * 200.0;
            let rows = usize::from(rows % 12);
            registry.register_container(container.clone(), Rect::new(x, 0.0, 180.0, 400.0), Axis::Vertical);
            for r in 0..rows {
                let id = ItemId::new(format!("{c}-{r}"));
                registry.register_item(container, id.clone(), Rect::new(x, r as f32 * 32.0, 180.0, 32.0));
                all.insert(id);
            }
        }
    }

    let mut last_id = 0;
    for op in input.ops.into_iter().take(256) {
        let transition = match op {
            Op::Down { item, x, y } => {
                let Some(id) = all.iter().nth(usize::from(item) % all.len().max(1)).cloned() else {
                    continue;
                };
                Some(surface.pointer_down(&id, point(x, y)))
            }
            Op::Move { x, y } => {
                surface.pointer_move(point(x, y));
                None
            }
            Op::Frame => Some(surface.animation_frame()),
            Op::Up { x, y } => Some(surface.pointer_up(point(x, y))),
            Op::Leave => Some(surface.pointer_leave()),
            Op::Escape => Some(surface.cancel(CancelReason::Escape)),
            Op::ToggleColumns { container } => {
                let id = &containers[usize::from(container)];
                let accepts = surface.registry().container(id).is_some_and(|c| c.accepts_columns);
                surface.registry_mut().set_accepts_columns(id, !accepts);
                None
            }
        };

        if let Some(transition) = transition {
            assert!(transition.transition_id > last_id, "transition ids must increase");
            last_id = transition.transition_id;
        }

        // Commits only ever permute ids across containers.
        let mut seen = BTreeSet::new();
        for container in &containers {
            for id in surface.registry().order(container).unwrap_or_default() {
                assert!(seen.insert(id), "id registered twice");
            }
        }
        assert_eq!(seen, all, "ids lost or invented");

        let max = surface.config().max_columns;
        for container in surface.registry().containers() {
            for item in container.items() {
                assert!(container.column_count(&item.id) <= max, "column ceiling exceeded");
            }
        }
    }
});
