//! Property-based invariant tests for hit testing.
//!
//! 1. Inside a container there is always a target; outside all, none
//! 2. The dragged item is never its own target
//! 3. The insertion index is within [0, len]
//! 4. Edge agrees with the side of the target's midpoint
//! 5. Hit testing is deterministic

use dragkit_core::geometry::{Axis, Edge, Point, Rect};
use dragkit_core::id::{ContainerId, ItemId};
use dragkit_layout::{GeometryRegistry, hit_test};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

/// A vertical list of `n` rows with optional gaps, at x=0..200.
fn list_strategy() -> impl Strategy<Value = (Vec<f32>, f32)> {
    (prop::collection::vec(4.0f32..60.0, 0..12), 0.0f32..12.0)
}

fn build(heights: &[f32], gap: f32) -> GeometryRegistry {
    let mut registry = GeometryRegistry::new();
    let total: f32 = heights.iter().sum::<f32>() + gap * heights.len() as f32;
    let list = ContainerId::from("list");
    registry.register_container(list.clone(), Rect::new(0.0, 0.0, 200.0, total.max(10.0)), Axis::Vertical);
    let mut y = 0.0;
    for (i, h) in heights.iter().enumerate() {
        registry.register_item(&list, format!("item-{i}"), Rect::new(0.0, y, 200.0, *h));
        y += h + gap;
    }
    registry
}

// ═══════════════════════════════════════════════════════════════════════
// Target resolution
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn inside_container_always_targets((heights, gap) in list_strategy(), fx in 0.0f32..1.0, fy in 0.0f32..1.0) {
        let registry = build(&heights, gap);
        let rect = registry.container(&ContainerId::from("list")).map(|c| c.rect).expect("registered");
        let pointer = Point::new(rect.x + fx * rect.width * 0.999, rect.y + fy * rect.height * 0.999);
        let hit = hit_test(pointer, &registry, None);
        prop_assert!(hit.is_some());
        let hit = hit.expect("checked");
        prop_assert!(hit.index <= heights.len());
        prop_assert_eq!(hit.item_id.is_none(), heights.is_empty());
    }

    #[test]
    fn outside_container_never_targets((heights, gap) in list_strategy(), x in 200.0f32..1000.0, y in -100.0f32..1000.0) {
        let registry = build(&heights, gap);
        prop_assert!(hit_test(Point::new(x, y), &registry, None).is_none());
    }

    #[test]
    fn dragged_item_is_excluded((heights, gap) in list_strategy(), pick in any::<prop::sample::Index>(), fy in 0.0f32..1.0) {
        prop_assume!(!heights.is_empty());
        let registry = build(&heights, gap);
        let dragged = ItemId::from(format!("item-{}", pick.index(heights.len())));
        let (_, geometry) = registry.locate(&dragged).expect("registered");
        // Pointer somewhere over the dragged item itself.
        let pointer = Point::new(100.0, geometry.rect.y + fy * geometry.rect.height * 0.999);
        let hit = hit_test(pointer, &registry, Some(&dragged)).expect("inside container");
        prop_assert_ne!(hit.item_id, Some(dragged));
    }

    #[test]
    fn edge_matches_midpoint_side((heights, gap) in list_strategy(), fy in 0.0f32..1.0) {
        let registry = build(&heights, gap);
        let rect = registry.container(&ContainerId::from("list")).map(|c| c.rect).expect("registered");
        let pointer = Point::new(50.0, rect.y + fy * rect.height * 0.999);
        let hit = hit_test(pointer, &registry, None).expect("inside");
        if let Some(item_rect) = hit.item_rect {
            let expected = if pointer.y < item_rect.midpoint(Axis::Vertical) { Edge::Before } else { Edge::After };
            prop_assert_eq!(hit.edge, expected);
        }
    }

    #[test]
    fn hit_test_is_deterministic((heights, gap) in list_strategy(), x in -10.0f32..210.0, y in -10.0f32..800.0) {
        let registry = build(&heights, gap);
        let pointer = Point::new(x, y);
        prop_assert_eq!(hit_test(pointer, &registry, None), hit_test(pointer, &registry, None));
    }
}
