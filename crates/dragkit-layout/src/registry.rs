#![forbid(unsafe_code)]

//! Registered-geometry cache.
//!
//! Each reorderable item registers its bounding rectangle when it mounts or
//! resizes; hit testing reads from this cache instead of querying the render
//! tree. The registry also mirrors each container's id order so a drag
//! surface can compute new orders without holding host payloads.
//!
//! # Invariants
//!
//! 1. Container ids are unique within a registry.
//! 2. Item ids are unique within a container.
//! 3. Container registration order is stacking order: later containers are
//!    considered on top of earlier ones when they overlap.
//! 4. Column groups are container-local. Each grouped item is one column of
//!    its group, so a group's column count is the number of items in the
//!    container that carry its id. Moving an item to another container
//!    drops its membership.

use dragkit_core::geometry::{Axis, Rect};
use dragkit_core::id::{ContainerId, ItemId};
use dragkit_core::item::Keyed;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Bounding geometry of one registered item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemGeometry {
    pub id: ItemId,
    pub rect: Rect,
    /// Side-by-side column group this item belongs to, if any.
    pub group: Option<ItemId>,
}

impl ItemGeometry {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
            group: None,
        }
    }
}

impl Keyed for ItemGeometry {
    #[inline]
    fn key(&self) -> &ItemId {
        &self.id
    }
}

/// Bounding geometry and ordered items of one registered container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerGeometry {
    pub id: ContainerId,
    pub rect: Rect,
    pub axis: Axis,
    /// Whether perpendicular drags may split items into columns here.
    pub accepts_columns: bool,
    items: Vec<ItemGeometry>,
}

impl ContainerGeometry {
    /// Items in container order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[ItemGeometry] {
        &self.items
    }

    #[must_use]
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&ItemGeometry> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Item ids in container order.
    #[must_use]
    pub fn order(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// Column group of `id`, if it is registered here and grouped.
    #[must_use]
    pub fn group_of(&self, id: &ItemId) -> Option<&ItemId> {
        self.item(id).and_then(|item| item.group.as_ref())
    }

    /// Items carrying `group`, in container order.
    #[must_use]
    pub fn group_members(&self, group: &ItemId) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|item| item.group.as_ref() == Some(group))
            .map(|item| item.id.clone())
            .collect()
    }

    /// Columns in the group holding `id` (1 when ungrouped or unknown).
    #[must_use]
    pub fn column_count(&self, id: &ItemId) -> usize {
        match self.group_of(id) {
            Some(group) => self.items.iter().filter(|item| item.group.as_ref() == Some(group)).count(),
            None => 1,
        }
    }
}

/// Cache of container and item geometry for one drag surface.
#[derive(Debug, Clone, Default)]
pub struct GeometryRegistry {
    containers: Vec<ContainerGeometry>,
    index: FxHashMap<ContainerId, usize>,
    generation: u64,
}

impl GeometryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container or update its bounds and axis.
    ///
    /// Returns `true` when the container is new. Existing items are kept.
    pub fn register_container(&mut self, id: impl Into<ContainerId>, rect: Rect, axis: Axis) -> bool {
        let id = id.into();
        self.bump();
        if let Some(&index) = self.index.get(&id) {
            let container = &mut self.containers[index];
            container.rect = rect;
            container.axis = axis;
            dragkit_core::trace!(container = %id, "registry.container.update");
            return false;
        }
        dragkit_core::trace!(container = %id, "registry.container.register");
        self.index.insert(id.clone(), self.containers.len());
        self.containers.push(ContainerGeometry {
            id,
            rect,
            axis,
            accepts_columns: false,
            items: Vec::new(),
        });
        true
    }

    /// Allow or forbid column splitting inside a container.
    pub fn set_accepts_columns(&mut self, id: &ContainerId, accepts: bool) -> bool {
        let Some(container) = self.container_mut(id) else {
            return false;
        };
        container.accepts_columns = accepts;
        self.bump();
        true
    }

    /// Remove a container and all its items.
    pub fn unregister_container(&mut self, id: &ContainerId) -> Option<ContainerGeometry> {
        let index = self.index.remove(id)?;
        let removed = self.containers.remove(index);
        self.rebuild_index();
        self.bump();
        dragkit_core::trace!(container = %id, "registry.container.unregister");
        Some(removed)
    }

    /// Register an item at the end of `container`, or update its rect if
    /// already registered there. Returns `false` if the container is unknown.
    pub fn register_item(&mut self, container: &ContainerId, id: impl Into<ItemId>, rect: Rect) -> bool {
        let id = id.into();
        let Some(geometry) = self.container_mut(container) else {
            return false;
        };
        match geometry.items.iter_mut().find(|item| item.id == id) {
            Some(existing) => existing.rect = rect,
            None => geometry.items.push(ItemGeometry::new(id, rect)),
        }
        self.bump();
        true
    }

    /// Replace every item of `container`, in order. Later duplicates are
    /// dropped. Returns `false` if the container is unknown.
    pub fn set_items(
        &mut self,
        container: &ContainerId,
        items: impl IntoIterator<Item = (ItemId, Rect)>,
    ) -> bool {
        let Some(geometry) = self.container_mut(container) else {
            return false;
        };
        let mut next: Vec<ItemGeometry> = Vec::new();
        for (id, rect) in items {
            if next.iter().all(|item| item.id != id) {
                next.push(ItemGeometry::new(id, rect));
            }
        }
        geometry.items = next;
        self.bump();
        true
    }

    /// Update the rect of an item wherever it is registered.
    pub fn update_item_rect(&mut self, id: &ItemId, rect: Rect) -> bool {
        let Some(item) = self.item_mut(id) else {
            return false;
        };
        item.rect = rect;
        self.bump();
        true
    }

    /// Put `id` into column group `group`, or take it out with `None`.
    pub fn set_item_group(&mut self, id: &ItemId, group: Option<ItemId>) -> bool {
        let Some(item) = self.item_mut(id) else {
            return false;
        };
        item.group = group;
        self.bump();
        true
    }

    /// Take `id` out of its column group. When fewer than `min_columns`
    /// members remain, the group is dissolved and its members ungrouped.
    ///
    /// Returns `false` if the item is unknown or was not grouped.
    pub fn leave_group(&mut self, id: &ItemId, min_columns: usize) -> bool {
        let Some(container) = self
            .containers
            .iter_mut()
            .find(|container| container.position(id).is_some())
        else {
            return false;
        };
        let Some(group) = container
            .items
            .iter_mut()
            .find(|item| &item.id == id)
            .and_then(|item| item.group.take())
        else {
            return false;
        };
        let remaining = container.group_members(&group).len();
        if remaining < min_columns {
            for item in &mut container.items {
                if item.group.as_ref() == Some(&group) {
                    item.group = None;
                }
            }
            dragkit_core::trace!(group = %group, "registry.group.dissolve");
        }
        self.bump();
        true
    }

    /// Remove an item from whichever container holds it.
    pub fn unregister_item(&mut self, id: &ItemId) -> bool {
        let Some((container, index)) = self
            .containers
            .iter()
            .enumerate()
            .find_map(|(c, container)| container.position(id).map(|index| (c, index)))
        else {
            return false;
        };
        self.containers[container].items.remove(index);
        self.bump();
        dragkit_core::trace!(item = %id, "registry.item.unregister");
        true
    }

    /// Rearrange a container's items to follow `order`.
    ///
    /// `order` must be a permutation of the container's ids; otherwise
    /// nothing changes and `false` is returned.
    pub fn apply_order(&mut self, container: &ContainerId, order: &[ItemId]) -> bool {
        let Some(geometry) = self.container_mut(container) else {
            return false;
        };
        if order.len() != geometry.items.len() {
            return false;
        }
        let mut next = Vec::with_capacity(order.len());
        for id in order {
            match geometry.item(id) {
                Some(item) if next.iter().all(|n: &ItemGeometry| &n.id != id) => {
                    next.push(item.clone());
                }
                _ => return false,
            }
        }
        geometry.items = next;
        self.bump();
        true
    }

    /// Move an item's geometry into another container at `index` (clamped).
    /// The item leaves its column group; see [`Self::leave_group`] to repair
    /// the group it leaves behind.
    pub fn move_item(&mut self, id: &ItemId, target: &ContainerId, index: usize) -> bool {
        let Some(&target_index) = self.index.get(target) else {
            return false;
        };
        if self.containers[target_index].position(id).is_some() {
            return false;
        }
        let Some(source_index) = self
            .containers
            .iter()
            .position(|container| container.position(id).is_some())
        else {
            return false;
        };
        let source = &mut self.containers[source_index];
        let Some(position) = source.position(id) else {
            return false;
        };
        let mut item = source.items.remove(position);
        item.group = None;
        let target = &mut self.containers[target_index];
        let index = index.min(target.items.len());
        target.items.insert(index, item);
        self.bump();
        true
    }

    #[must_use]
    pub fn container(&self, id: &ContainerId) -> Option<&ContainerGeometry> {
        self.index.get(id).map(|&index| &self.containers[index])
    }

    /// Containers in registration (stacking) order.
    pub fn containers(&self) -> impl DoubleEndedIterator<Item = &ContainerGeometry> + '_ {
        self.containers.iter()
    }

    /// Find the container holding `id` and the item's geometry.
    #[must_use]
    pub fn locate(&self, id: &ItemId) -> Option<(&ContainerGeometry, &ItemGeometry)> {
        self.containers
            .iter()
            .find_map(|container| container.item(id).map(|item| (container, item)))
    }

    #[must_use]
    pub fn contains_item(&self, id: &ItemId) -> bool {
        self.locate(id).is_some()
    }

    /// Item ids of a container in order.
    #[must_use]
    pub fn order(&self, container: &ContainerId) -> Option<Vec<ItemId>> {
        self.container(container).map(ContainerGeometry::order)
    }

    /// Number of registered containers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Counter bumped on every mutation.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.containers.clear();
        self.index.clear();
        self.bump();
    }

    fn container_mut(&mut self, id: &ContainerId) -> Option<&mut ContainerGeometry> {
        let index = *self.index.get(id)?;
        Some(&mut self.containers[index])
    }

    fn item_mut(&mut self, id: &ItemId) -> Option<&mut ItemGeometry> {
        self.containers
            .iter_mut()
            .find_map(|container| container.items.iter_mut().find(|item| &item.id == id))
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (index, container) in self.containers.iter().enumerate() {
            self.index.insert(container.id.clone(), index);
        }
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}
