#![forbid(unsafe_code)]

//! Per-drag mutable state.

use dragkit_core::direction::DragDirection;
use dragkit_core::geometry::{Edge, Point};
use dragkit_core::id::{ContainerId, ItemId};
use dragkit_layout::HitTarget;
use serde::{Deserialize, Serialize};

use crate::feedback::{DropIndicator, DropIntent};

/// The one in-flight drag of a surface.
///
/// Created on drag start, updated on every processed sample, and consumed
/// when the drag commits or cancels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub source_id: ItemId,
    pub source_container_id: ContainerId,
    pub start_pointer: Point,
    pub last_pointer: Point,
    /// `None` while the pointer is still inside the dead zone.
    pub direction: Option<DragDirection>,
    pub target_id: Option<ItemId>,
    pub target_container_id: Option<ContainerId>,
    pub drop_position: Option<Edge>,
    pub hit: Option<HitTarget>,
    pub intent: Option<DropIntent>,
    pub indicator: Option<DropIndicator>,
    /// Processed samples, not counting coalesced ones.
    pub sample_count: u64,
}

impl DragSession {
    #[must_use]
    pub fn new(source_id: ItemId, source_container_id: ContainerId, start_pointer: Point) -> Self {
        Self {
            source_id,
            source_container_id,
            start_pointer,
            last_pointer: start_pointer,
            direction: None,
            target_id: None,
            target_container_id: None,
            drop_position: None,
            hit: None,
            intent: None,
            indicator: None,
            sample_count: 0,
        }
    }

    /// Record a processed sample and its hit.
    pub fn record(&mut self, pointer: Point, direction: Option<DragDirection>, hit: Option<HitTarget>) {
        self.last_pointer = pointer;
        self.direction = direction;
        self.sample_count = self.sample_count.saturating_add(1);
        match &hit {
            Some(hit) => {
                let intent = DropIntent::resolve(direction, hit);
                self.target_id = hit.item_id.clone();
                self.target_container_id = Some(hit.container_id.clone());
                self.drop_position = Some(match intent {
                    DropIntent::Reorder => hit.edge,
                    DropIntent::ColumnSplit => hit.cross_edge,
                });
                self.intent = Some(intent);
            }
            None => {
                self.target_id = None;
                self.target_container_id = None;
                self.drop_position = None;
                self.intent = None;
            }
        }
        self.hit = hit;
    }

    /// Whether the cross-container case applies to the current target.
    #[must_use]
    pub fn is_cross_container(&self) -> bool {
        self.target_container_id
            .as_ref()
            .is_some_and(|target| target != &self.source_container_id)
    }
}
