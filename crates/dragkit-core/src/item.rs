#![forbid(unsafe_code)]

//! Reorderable items and the ordered containers that hold them.
//!
//! # Invariants
//!
//! 1. Item ids are unique within a [`Container`]. Every mutating method that
//!    could introduce a duplicate rejects it instead.
//! 2. Container order is the sole source of truth for display order; an
//!    item's index is never stored.
//! 3. Payloads are opaque: nothing in this workspace inspects `T`.

use serde::{Deserialize, Serialize};

use crate::id::{ContainerId, ItemId};

/// Anything that carries an [`ItemId`] and can therefore be reordered.
pub trait Keyed {
    fn key(&self) -> &ItemId;
}

impl Keyed for ItemId {
    #[inline]
    fn key(&self) -> &ItemId {
        self
    }
}

/// An opaque reorderable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item<T> {
    pub id: ItemId,
    pub payload: T,
}

impl<T> Item<T> {
    /// Create an item.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, payload: T) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }
}

impl<T> Keyed for Item<T> {
    #[inline]
    fn key(&self) -> &ItemId {
        &self.id
    }
}

/// An ordered sequence of uniquely identified items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container<T> {
    id: ContainerId,
    items: Vec<Item<T>>,
}

impl<T> Container<T> {
    /// Create an empty container.
    #[must_use]
    pub fn new(id: impl Into<ContainerId>) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
        }
    }

    /// Create a container from items in display order.
    ///
    /// Later items whose id was already seen are dropped.
    #[must_use]
    pub fn from_items(id: impl Into<ContainerId>, items: impl IntoIterator<Item = Item<T>>) -> Self {
        let mut container = Self::new(id);
        for item in items {
            container.push(item);
        }
        container
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &ContainerId {
        &self.id
    }

    #[inline]
    #[must_use]
    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of `id` in display order.
    #[must_use]
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item<T>> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Item ids in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// Append an item. Returns `false` (and drops nothing) on a duplicate id.
    pub fn push(&mut self, item: Item<T>) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Insert at `index`, clamped to `[0, len]`. Returns `false` on a
    /// duplicate id.
    pub fn insert(&mut self, index: usize, item: Item<T>) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        true
    }

    /// Remove an item by id.
    pub fn remove(&mut self, id: &ItemId) -> Option<Item<T>> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    /// Rearrange items to follow `order`.
    ///
    /// `order` must be a permutation of the current ids; otherwise the
    /// container is left untouched and `false` is returned.
    pub fn apply_order(&mut self, order: &[ItemId]) -> bool {
        if order.len() != self.items.len() {
            return false;
        }
        let mut indices = Vec::with_capacity(order.len());
        for id in order {
            match self.position(id) {
                Some(index) if !indices.contains(&index) => indices.push(index),
                _ => return false,
            }
        }
        let mut remaining: Vec<Option<Item<T>>> = self.items.drain(..).map(Some).collect();
        self.items = indices
            .into_iter()
            .filter_map(|index| remaining[index].take())
            .collect();
        true
    }

    /// Consume the container, yielding its id and items.
    #[must_use]
    pub fn into_parts(self) -> (ContainerId, Vec<Item<T>>) {
        (self.id, self.items)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item<T>> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a Container<T> {
    type Item = &'a Item<T>;
    type IntoIter = std::slice::Iter<'a, Item<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
