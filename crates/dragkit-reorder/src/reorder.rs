#![forbid(unsafe_code)]

//! Same-container reorder and cross-container moves.
//!
//! Every function here is pure: it reads the input slices and returns new
//! vectors. Unknown ids and self-drops return the input unchanged (or `None`
//! for moves) so callers never have to handle an error on the drop path.

use dragkit_core::geometry::Edge;
use dragkit_core::id::ItemId;
use dragkit_core::item::{Container, Item, Keyed};
use serde::{Deserialize, Serialize};

/// Move `source` next to `target`, on the side given by `edge`.
///
/// The source is removed first and then inserted before or after the
/// target's position in the remaining list. When `source == target` or
/// either id is missing the result equals the input.
///
/// ```
/// use dragkit_core::geometry::Edge;
/// use dragkit_core::id::ItemId;
/// use dragkit_reorder::reorder;
///
/// let ids: Vec<ItemId> = ["A", "B", "C"].into_iter().map(ItemId::from).collect();
/// let out = reorder(&ids, &ItemId::from("A"), &ItemId::from("C"), Edge::After);
/// assert_eq!(out, ["B", "C", "A"].map(ItemId::from));
/// ```
#[must_use]
pub fn reorder<E: Keyed + Clone>(items: &[E], source: &ItemId, target: &ItemId, edge: Edge) -> Vec<E> {
    if source == target {
        return items.to_vec();
    }
    let Some(from) = position(items, source) else {
        return items.to_vec();
    };
    let mut out = items.to_vec();
    let moved = out.remove(from);
    let Some(to) = position(&out, target) else {
        return items.to_vec();
    };
    let at = match edge {
        Edge::Before => to,
        Edge::After => to + 1,
    };
    out.insert(at, moved);
    out
}

/// Move `source` so it lands at insertion `index` of the full order.
///
/// `index` counts slots in the original list including the source itself,
/// which is how hit testing reports it; it is clamped to `[0, len]`.
#[must_use]
pub fn reorder_to_index<E: Keyed + Clone>(items: &[E], source: &ItemId, index: usize) -> Vec<E> {
    let Some(from) = position(items, source) else {
        return items.to_vec();
    };
    let index = index.min(items.len());
    let mut out = items.to_vec();
    let moved = out.remove(from);
    let at = if index > from { index - 1 } else { index };
    out.insert(at, moved);
    out
}

/// Result of moving one item between two containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossContainerMove<E> {
    /// Source container order without the moved item.
    pub source: Vec<E>,
    /// Target container order with the moved item inserted.
    pub target: Vec<E>,
    /// Index the item was inserted at after clamping.
    pub index: usize,
}

/// Remove `source_id` from `source` and insert it into `target` at
/// `target_index`, clamped to `[0, target.len()]`.
///
/// Returns `None` when `source_id` is not in `source`, or when `target`
/// already holds an item with that id.
#[must_use]
pub fn move_cross_container<E: Keyed + Clone>(
    source: &[E],
    target: &[E],
    source_id: &ItemId,
    target_index: usize,
) -> Option<CrossContainerMove<E>> {
    let from = position(source, source_id)?;
    if position(target, source_id).is_some() {
        return None;
    }
    let mut source = source.to_vec();
    let moved = source.remove(from);
    let index = target_index.min(target.len());
    let mut target = target.to_vec();
    target.insert(index, moved);
    Some(CrossContainerMove {
        source,
        target,
        index,
    })
}

fn position<E: Keyed>(items: &[E], id: &ItemId) -> Option<usize> {
    items.iter().position(|item| item.key() == id)
}

/// Reorder operations on [`Container`], returning new containers.
pub trait ContainerExt: Sized {
    /// See [`reorder`].
    #[must_use]
    fn reordered(&self, source: &ItemId, target: &ItemId, edge: Edge) -> Self;

    /// See [`move_cross_container`]. Returns `(source, target)`.
    #[must_use]
    fn moved_into(&self, target: &Self, source_id: &ItemId, target_index: usize) -> Option<(Self, Self)>;
}

impl<T: Clone> ContainerExt for Container<T> {
    fn reordered(&self, source: &ItemId, target: &ItemId, edge: Edge) -> Self {
        let items: Vec<Item<T>> = reorder(self.items(), source, target, edge);
        Container::from_items(self.id().clone(), items)
    }

    fn moved_into(&self, target: &Self, source_id: &ItemId, target_index: usize) -> Option<(Self, Self)> {
        let moved = move_cross_container(self.items(), target.items(), source_id, target_index)?;
        Some((
            Container::from_items(self.id().clone(), moved.source),
            Container::from_items(target.id().clone(), moved.target),
        ))
    }
}
