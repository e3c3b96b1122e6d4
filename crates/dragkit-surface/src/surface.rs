#![forbid(unsafe_code)]

//! Drag surface lifecycle machine.
//!
//! ```text
//! Idle --pointer_down--> Dragging --pointer_up--> (committing) --> Idle
//!                           |
//!                           +--cancel / no target--> (cancelled) --> Idle
//! ```
//!
//! `committing` and `cancelled` are not resting states: a single call leaves
//! the machine idle again and the [`DragEffect`] of the returned
//! [`DragTransition`] says which way the drag ended.
//!
//! Every call that changes or inspects the lifecycle returns a transition
//! with a monotonically increasing `transition_id`. Calls that do not apply
//! in the current phase return [`DragEffect::Noop`] with a reason instead of
//! an error.
//!
//! # Frame cadence
//!
//! [`DragSurface::pointer_move`] only records the sample. The host schedules
//! an animation frame when told to ([`SampleOutcome::FrameRequested`]) and
//! calls [`DragSurface::animation_frame`] from it, which runs direction
//! classification, hit testing and indicator projection once for the latest
//! sample.

use dragkit_core::config::{DragConfig, DragConfigError};
use dragkit_core::direction::{DirectionClassifier, DragDirection};
use dragkit_core::geometry::{Edge, Point};
use dragkit_core::id::{ContainerId, ItemId};
use dragkit_core::pointer::{PointerStats, PointerTracker, SampleOutcome};
use dragkit_layout::{ContainerGeometry, GeometryRegistry, HitTarget, hit_test};
use dragkit_reorder::{
    ColumnGroup, ColumnLimits, ColumnSplit, RejectReason, Row, move_cross_container, reorder,
    split_into_columns,
};
use serde::{Deserialize, Serialize};
#[cfg(feature = "tracing")]
use web_time::Instant;

use crate::feedback::{DropIndicator, DropIntent, IndicatorStyle, project};
use crate::session::DragSession;

/// Resting lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DragPhase {
    Idle,
    Dragging {
        source_id: ItemId,
        source_container_id: ContainerId,
    },
}

/// Explicit no-op diagnostics for calls that are safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    IdleWithoutActiveDrag,
    ActiveDragInProgress,
    /// Pointer-down on an item that is not registered.
    UnknownItem,
    /// Animation frame with no sample waiting.
    NoPendingSample,
    /// Pointer left the surface but `cancel_on_leave` is off.
    LeaveIgnored,
}

/// Why a drag ended without committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    Escape,
    Leave,
    Blur,
    FocusLost,
    PointerCancel,
    Programmatic,
    /// Released outside every container.
    NoTarget,
    /// Released over a column group that is already full.
    ColumnCeiling,
}

/// The mutation a committed drag asks the host to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragCommit {
    /// New order of one container.
    Reorder {
        container: ContainerId,
        item: ItemId,
        order: Vec<ItemId>,
    },
    /// `item` moved from one container to another.
    Move {
        item: ItemId,
        source_container: ContainerId,
        target_container: ContainerId,
        source_order: Vec<ItemId>,
        target_order: Vec<ItemId>,
        index: usize,
    },
    /// Put `source` in a new column on the `edge` side of `target`.
    ColumnSplit {
        container: ContainerId,
        source: ItemId,
        target: ItemId,
        edge: Edge,
        /// Group that now holds `source`.
        group: ItemId,
        /// The container's rows after the split.
        rows: Vec<Row<ItemId>>,
    },
}

impl DragCommit {
    /// Short snake_case name of the commit kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Reorder { .. } => "reorder",
            Self::Move { .. } => "move",
            Self::ColumnSplit { .. } => "column_split",
        }
    }

    /// Invoke the matching handler callback exactly once.
    pub fn dispatch<H: DropHandler + ?Sized>(&self, handler: &mut H) {
        match self {
            Self::Reorder { container, order, .. } => handler.on_reorder(container, order),
            Self::Move {
                item,
                source_container,
                target_container,
                source_order,
                target_order,
                ..
            } => handler.on_move(item, source_container, target_container, source_order, target_order),
            Self::ColumnSplit {
                container,
                source,
                target,
                edge,
                rows,
                ..
            } => handler.on_column_split(container, source, target, *edge, rows),
        }
    }
}

/// Host callbacks for committed drags. Every method defaults to doing
/// nothing so hosts implement only what they use.
pub trait DropHandler {
    fn on_reorder(&mut self, _container: &ContainerId, _order: &[ItemId]) {}

    fn on_move(
        &mut self,
        _item: &ItemId,
        _source_container: &ContainerId,
        _target_container: &ContainerId,
        _source_order: &[ItemId],
        _target_order: &[ItemId],
    ) {
    }

    fn on_column_split(
        &mut self,
        _container: &ContainerId,
        _source: &ItemId,
        _target: &ItemId,
        _edge: Edge,
        _rows: &[Row<ItemId>],
    ) {
    }
}

/// Transition effect emitted by one lifecycle step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Started {
        source_id: ItemId,
        source_container_id: ContainerId,
        origin: Point,
    },
    Updated {
        pointer: Point,
        direction: Option<DragDirection>,
        target: Option<HitTarget>,
        indicator: Option<DropIndicator>,
    },
    Committed {
        commit: DragCommit,
    },
    Cancelled {
        source_id: ItemId,
        reason: CancelReason,
    },
    Noop {
        reason: NoopReason,
    },
}

/// One lifecycle step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragPhase,
    pub to: DragPhase,
    pub effect: DragEffect,
}

impl DragTransition {
    /// The commit carried by this transition, if any.
    #[must_use]
    pub fn commit(&self) -> Option<&DragCommit> {
        match &self.effect {
            DragEffect::Committed { commit } => Some(commit),
            _ => None,
        }
    }

    #[must_use]
    pub fn indicator(&self) -> Option<&DropIndicator> {
        match &self.effect {
            DragEffect::Updated { indicator, .. } => indicator.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self.effect, DragEffect::Noop { .. })
    }
}

/// Drag controller for one surface: owns the geometry registry, the pointer
/// tracker and at most one [`DragSession`].
#[derive(Debug, Clone)]
pub struct DragSurface {
    config: DragConfig,
    classifier: DirectionClassifier,
    style: IndicatorStyle,
    registry: GeometryRegistry,
    tracker: PointerTracker,
    session: Option<DragSession>,
    transition_counter: u64,
}

impl Default for DragSurface {
    fn default() -> Self {
        let config = DragConfig::default();
        Self {
            classifier: config.classifier(),
            style: IndicatorStyle {
                thickness: config.indicator_thickness,
            },
            config,
            registry: GeometryRegistry::new(),
            tracker: PointerTracker::new(),
            session: None,
            transition_counter: 0,
        }
    }
}

impl DragSurface {
    /// Construct a surface with a validated configuration.
    pub fn new(config: DragConfig) -> Result<Self, DragConfigError> {
        Self::with_registry(config, GeometryRegistry::new())
    }

    /// Construct a surface over pre-registered geometry.
    pub fn with_registry(config: DragConfig, registry: GeometryRegistry) -> Result<Self, DragConfigError> {
        config.validate()?;
        Ok(Self {
            classifier: config.classifier(),
            style: IndicatorStyle {
                thickness: config.indicator_thickness,
            },
            config,
            registry,
            tracker: PointerTracker::new(),
            session: None,
            transition_counter: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &GeometryRegistry {
        &self.registry
    }

    /// Mutable geometry access; hosts may re-register at any time, including
    /// mid-drag.
    pub fn registry_mut(&mut self) -> &mut GeometryRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Current resting phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        match &self.session {
            None => DragPhase::Idle,
            Some(session) => DragPhase::Dragging {
                source_id: session.source_id.clone(),
                source_container_id: session.source_container_id.clone(),
            },
        }
    }

    /// Latest projected indicator of the active drag.
    #[must_use]
    pub fn indicator(&self) -> Option<&DropIndicator> {
        self.session.as_ref().and_then(|session| session.indicator.as_ref())
    }

    /// Sampling counters for the current (or last) drag.
    #[must_use]
    pub fn pointer_stats(&self) -> PointerStats {
        self.tracker.stats()
    }

    /// Begin dragging `item` from `pointer`.
    pub fn pointer_down(&mut self, item: &ItemId, pointer: Point) -> DragTransition {
        let from = self.phase();
        if self.session.is_some() {
            return self.noop(from, NoopReason::ActiveDragInProgress);
        }
        let Some((container, _)) = self.registry.locate(item) else {
            return self.noop(from, NoopReason::UnknownItem);
        };
        let source_container_id = container.id.clone();

        dragkit_core::info!(
            source = %item,
            container = %source_container_id,
            x = pointer.x,
            y = pointer.y,
            "drag.start"
        );
        self.tracker.start(pointer);
        self.session = Some(DragSession::new(item.clone(), source_container_id.clone(), pointer));
        self.transition(
            from,
            DragEffect::Started {
                source_id: item.clone(),
                source_container_id,
                origin: pointer,
            },
        )
    }

    /// Record a pointer move. Cheap: no hit testing happens here.
    pub fn pointer_move(&mut self, pointer: Point) -> SampleOutcome {
        if self.session.is_none() {
            return SampleOutcome::Inactive;
        }
        self.tracker.sample(pointer)
    }

    /// Process the pending sample at an animation-frame boundary.
    pub fn animation_frame(&mut self) -> DragTransition {
        let from = self.phase();
        if self.session.is_none() {
            return self.noop(from, NoopReason::IdleWithoutActiveDrag);
        }
        let Some(pointer) = self.tracker.take_frame() else {
            return self.noop(from, NoopReason::NoPendingSample);
        };
        let effect = self.process_sample(pointer);
        self.transition(from, effect)
    }

    /// Finish the drag at `pointer`: commit over a valid target, otherwise
    /// cancel with [`CancelReason::NoTarget`].
    pub fn pointer_up(&mut self, pointer: Point) -> DragTransition {
        let from = self.phase();
        if self.session.is_none() {
            return self.noop(from, NoopReason::IdleWithoutActiveDrag);
        }
        self.tracker.sample(pointer);
        if let Some(last) = self.tracker.stop() {
            self.process_sample(last);
        }
        let Some(session) = self.session.take() else {
            return self.noop(from, NoopReason::IdleWithoutActiveDrag);
        };

        let effect = match self.resolve_commit(&session) {
            Ok(commit) => {
                self.apply_to_registry(&commit);
                dragkit_core::info!(
                    source = %session.source_id,
                    samples = session.sample_count,
                    kind = commit.kind(),
                    "drag.commit"
                );
                DragEffect::Committed { commit }
            }
            Err(reason) => {
                dragkit_core::info!(source = %session.source_id, ?reason, "drag.cancel");
                DragEffect::Cancelled {
                    source_id: session.source_id,
                    reason,
                }
            }
        };
        self.transition(from, effect)
    }

    /// Abort the active drag, discarding its session.
    pub fn cancel(&mut self, reason: CancelReason) -> DragTransition {
        let from = self.phase();
        let Some(session) = self.session.take() else {
            return self.noop(from, NoopReason::IdleWithoutActiveDrag);
        };
        self.tracker.stop();
        dragkit_core::info!(source = %session.source_id, ?reason, "drag.cancel");
        self.transition(
            from,
            DragEffect::Cancelled {
                source_id: session.source_id,
                reason,
            },
        )
    }

    /// The pointer left the surface. Cancels when `cancel_on_leave` is set.
    pub fn pointer_leave(&mut self) -> DragTransition {
        if self.session.is_some() && !self.config.cancel_on_leave {
            let from = self.phase();
            return self.noop(from, NoopReason::LeaveIgnored);
        }
        self.cancel(CancelReason::Leave)
    }

    fn process_sample(&mut self, pointer: Point) -> DragEffect {
        let Some(session) = self.session.as_mut() else {
            return DragEffect::Noop {
                reason: NoopReason::IdleWithoutActiveDrag,
            };
        };
        let direction = self.classifier.classify(session.start_pointer, pointer);

        #[cfg(feature = "tracing")]
        let hit_started = Instant::now();
        let hit = hit_test(pointer, &self.registry, Some(&session.source_id));
        #[cfg(feature = "tracing")]
        let hit_test_us = hit_started.elapsed().as_micros() as u64;

        session.record(pointer, direction, hit);
        let indicator = project(session, session.hit.as_ref(), self.style).filter(|indicator| {
            indicator.intent != DropIntent::ColumnSplit
                || !session.hit.as_ref().is_some_and(|hit| {
                    column_ceiling_reached(&self.registry, &session.source_id, hit, self.config.max_columns)
                })
        });
        session.indicator = indicator;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "drag.update",
            x = pointer.x,
            y = pointer.y,
            direction = ?direction,
            target = session.target_id.as_ref().map(ItemId::as_str),
            container = session.target_container_id.as_ref().map(ContainerId::as_str),
            intent = ?session.intent,
            hit_test_us,
        );

        DragEffect::Updated {
            pointer,
            direction,
            target: session.hit.clone(),
            indicator,
        }
    }

    fn resolve_commit(&self, session: &DragSession) -> Result<DragCommit, CancelReason> {
        let Some(hit) = session.hit.as_ref() else {
            return Err(CancelReason::NoTarget);
        };
        let source = &session.source_id;

        if session.intent == Some(DropIntent::ColumnSplit) {
            return self.resolve_column_split(source, hit);
        }

        let Some(target_order) = self.registry.order(&hit.container_id) else {
            return Err(CancelReason::NoTarget);
        };
        if hit.container_id == session.source_container_id {
            let order = match &hit.item_id {
                Some(target) => reorder(&target_order, source, target, hit.edge),
                None => target_order,
            };
            return Ok(DragCommit::Reorder {
                container: hit.container_id.clone(),
                item: source.clone(),
                order,
            });
        }

        let Some(source_order) = self.registry.order(&session.source_container_id) else {
            return Err(CancelReason::NoTarget);
        };
        let moved = move_cross_container(&source_order, &target_order, source, hit.index)
            .ok_or(CancelReason::NoTarget)?;
        Ok(DragCommit::Move {
            item: source.clone(),
            source_container: session.source_container_id.clone(),
            target_container: hit.container_id.clone(),
            source_order: moved.source,
            target_order: moved.target,
            index: moved.index,
        })
    }

    /// Run the column split against the target container's rows, with a
    /// source from another container appended as a single row.
    fn resolve_column_split(&self, source: &ItemId, hit: &HitTarget) -> Result<DragCommit, CancelReason> {
        let (Some(target), Some(container)) = (hit.item_id.as_ref(), self.registry.container(&hit.container_id))
        else {
            return Err(CancelReason::NoTarget);
        };
        let mut rows = rows_of(container);
        if container.position(source).is_none() {
            rows.push(Row::Single(source.clone()));
        }
        match split_into_columns(&rows, source, target, hit.cross_edge, ColumnLimits::from(&self.config)) {
            ColumnSplit::Applied(rows) => {
                let group = rows
                    .iter()
                    .find_map(|row| match row {
                        Row::Columns(group) if row.contains(source) => Some(group.id.clone()),
                        _ => None,
                    })
                    .ok_or(CancelReason::NoTarget)?;
                Ok(DragCommit::ColumnSplit {
                    container: hit.container_id.clone(),
                    source: source.clone(),
                    target: target.clone(),
                    edge: hit.cross_edge,
                    group,
                    rows,
                })
            }
            ColumnSplit::Rejected(RejectReason::ColumnCeiling { .. }) => Err(CancelReason::ColumnCeiling),
            ColumnSplit::Rejected(_) => Err(CancelReason::NoTarget),
        }
    }

    /// Keep the registry's id order and column groups in step with a commit.
    fn apply_to_registry(&mut self, commit: &DragCommit) {
        let min_columns = self.config.min_columns;
        match commit {
            DragCommit::Reorder { container, item, order } => {
                self.registry.leave_group(item, min_columns);
                self.registry.apply_order(container, order);
            }
            DragCommit::Move {
                item,
                target_container,
                index,
                ..
            } => {
                self.registry.leave_group(item, min_columns);
                self.registry.move_item(item, target_container, *index);
            }
            DragCommit::ColumnSplit {
                container,
                source,
                rows,
                ..
            } => {
                let in_container = self
                    .registry
                    .container(container)
                    .is_some_and(|geometry| geometry.position(source).is_some());
                if !in_container {
                    self.registry.leave_group(source, min_columns);
                    self.registry.move_item(source, container, usize::MAX);
                }
                let mut order = Vec::new();
                for row in rows {
                    match row {
                        Row::Single(id) => {
                            self.registry.set_item_group(id, None);
                            order.push(id.clone());
                        }
                        Row::Columns(group) => {
                            for id in group.columns.iter().flatten() {
                                self.registry.set_item_group(id, Some(group.id.clone()));
                                order.push(id.clone());
                            }
                        }
                    }
                }
                self.registry.apply_order(container, &order);
            }
        }
    }

    fn noop(&mut self, phase: DragPhase, reason: NoopReason) -> DragTransition {
        self.transition(phase, DragEffect::Noop { reason })
    }

    fn transition(&mut self, from: DragPhase, effect: DragEffect) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.phase(),
            effect,
        }
    }
}

/// Rows of a container: the members of one group gather, one column each,
/// at the position of the group's first member.
fn rows_of(container: &ContainerGeometry) -> Vec<Row<ItemId>> {
    let mut rows: Vec<Row<ItemId>> = Vec::new();
    for item in container.items() {
        let Some(group_id) = item.group.as_ref() else {
            rows.push(Row::Single(item.id.clone()));
            continue;
        };
        let existing = rows
            .iter()
            .position(|row| matches!(row, Row::Columns(group) if &group.id == group_id));
        match existing {
            Some(index) => {
                if let Row::Columns(group) = &mut rows[index] {
                    group.columns.push(vec![item.id.clone()]);
                }
            }
            None => rows.push(Row::Columns(ColumnGroup {
                id: group_id.clone(),
                columns: vec![vec![item.id.clone()]],
            })),
        }
    }
    rows
}

/// Whether a column split of `source` onto `hit` would exceed the ceiling.
/// A source already in the target's group frees its own column first.
fn column_ceiling_reached(registry: &GeometryRegistry, source: &ItemId, hit: &HitTarget, max_columns: usize) -> bool {
    hit.item_columns >= max_columns
        && registry
            .container(&hit.container_id)
            .and_then(|container| container.group_of(source))
            != hit.item_group.as_ref()
}
