#![forbid(unsafe_code)]

//! Deterministic browser pointer-capture adapter for drag-reorder surfaces.
//!
//! This module bridges DOM pointer lifecycle signals into [`DragSurface`]
//! calls while enforcing:
//! - one active pointer at a time,
//! - explicit capture acquire/release commands for JS hosts,
//! - animation-frame requests at the sampling cadence, and
//! - cancellation on interruption paths (blur/visibility/lost-capture).
//!
//! Every dispatch returns a [`PointerLogEntry`] whose `sequence` strictly
//! increases, so a host can record and replay an interaction exactly.

use std::fmt;

use dragkit_core::config::{DragConfig, DragConfigError};
use dragkit_core::geometry::Point;
use dragkit_core::id::ItemId;
use dragkit_core::pointer::SampleOutcome;
use dragkit_surface::{CancelReason, DragEffect, DragPhase, DragSurface, DragTransition};
use serde::{Deserialize, Serialize};

/// Mouse or pen button reported with a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Adapter configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerCaptureConfig {
    /// Drag surface options.
    pub drag: DragConfig,
    /// Button required to begin a drag.
    pub activation_button: PointerButton,
}

/// Adapter construction errors.
#[derive(Debug)]
pub enum PointerCaptureError {
    InvalidConfig(DragConfigError),
}

impl fmt::Display for PointerCaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(e) => write!(f, "invalid drag config: {e}"),
        }
    }
}

impl std::error::Error for PointerCaptureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfig(e) => Some(e),
        }
    }
}

impl From<DragConfigError> for PointerCaptureError {
    fn from(e: DragConfigError) -> Self {
        Self::InvalidConfig(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Requested,
    Acquired,
}

impl CaptureState {
    const fn is_acquired(self) -> bool {
        matches!(self, Self::Acquired)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActivePointer {
    pointer_id: u32,
    item: ItemId,
    button: PointerButton,
    capture_state: CaptureState,
}

/// Command the JS host must carry out after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HostCommand {
    /// `element.setPointerCapture(pointer_id)`.
    AcquireCapture { pointer_id: u32 },
    /// `element.releasePointerCapture(pointer_id)`.
    ReleaseCapture { pointer_id: u32 },
    /// `requestAnimationFrame(...)`, then call `animation_frame()`.
    RequestAnimationFrame,
}

/// Lifecycle phase recorded for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerLifecyclePhase {
    PointerDown,
    PointerMove,
    AnimationFrame,
    PointerUp,
    PointerCancel,
    PointerLeave,
    EscapeKey,
    Blur,
    VisibilityHidden,
    LostPointerCapture,
    CaptureAcquired,
}

/// Why an incoming lifecycle signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerIgnoredReason {
    InvalidPointerId,
    ButtonNotAllowed,
    ButtonMismatch,
    ActivePointerAlreadyInProgress,
    NoActivePointer,
    PointerMismatch,
    LeaveWhileCaptured,
    /// The surface answered with a no-op transition.
    SurfaceNoop,
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum PointerLogOutcome {
    /// The surface produced a transition.
    Forwarded,
    /// A move sample is waiting for the next frame.
    SampleQueued,
    /// A move sample replaced the pending one.
    SampleCoalesced,
    CaptureStateUpdated,
    Ignored(PointerIgnoredReason),
}

/// Structured lifecycle log record for one dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerLogEntry {
    pub sequence: u64,
    pub phase: PointerLifecyclePhase,
    pub pointer_id: Option<u32>,
    pub item: Option<ItemId>,
    pub position: Option<Point>,
    pub command: Option<HostCommand>,
    pub outcome: PointerLogOutcome,
}

/// Result of one pointer lifecycle dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerDispatch {
    pub transition: Option<DragTransition>,
    pub command: Option<HostCommand>,
    pub log: PointerLogEntry,
}

impl PointerDispatch {
    /// Whether the dispatch ended the drag with a commit.
    #[must_use]
    pub fn is_commit(&self) -> bool {
        self.transition
            .as_ref()
            .is_some_and(|transition| transition.commit().is_some())
    }
}

#[derive(Debug, Clone)]
struct DispatchContext {
    phase: PointerLifecyclePhase,
    pointer_id: Option<u32>,
    item: Option<ItemId>,
    position: Option<Point>,
}

impl DispatchContext {
    fn new(phase: PointerLifecyclePhase, pointer_id: Option<u32>) -> Self {
        Self {
            phase,
            pointer_id,
            item: None,
            position: None,
        }
    }

    fn item(mut self, item: Option<ItemId>) -> Self {
        self.item = item;
        self
    }

    fn position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }
}

/// Deterministic pointer-capture adapter for web hosts.
///
/// Owns the [`DragSurface`] it drives. Host commands returned from each
/// dispatch map onto DOM `setPointerCapture()`, `releasePointerCapture()`
/// and `requestAnimationFrame()`.
#[derive(Debug, Clone)]
pub struct PointerCaptureAdapter {
    surface: DragSurface,
    activation_button: PointerButton,
    active: Option<ActivePointer>,
    next_sequence: u64,
}

impl PointerCaptureAdapter {
    /// Construct an adapter over a fresh surface.
    pub fn new(config: PointerCaptureConfig) -> Result<Self, PointerCaptureError> {
        let surface = DragSurface::new(config.drag)?;
        Ok(Self::with_surface(surface, config.activation_button))
    }

    /// Construct an adapter over an existing surface.
    #[must_use]
    pub fn with_surface(surface: DragSurface, activation_button: PointerButton) -> Self {
        Self {
            surface,
            activation_button,
            active: None,
            next_sequence: 1,
        }
    }

    #[must_use]
    pub fn surface(&self) -> &DragSurface {
        &self.surface
    }

    /// Mutable surface access, e.g. to register geometry.
    pub fn surface_mut(&mut self) -> &mut DragSurface {
        &mut self.surface
    }

    /// Active pointer ID, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.active.as_ref().map(|active| active.pointer_id)
    }

    /// Handle pointer-down on the drag handle of `item`.
    pub fn pointer_down(
        &mut self,
        item: &ItemId,
        pointer_id: u32,
        button: PointerButton,
        position: Point,
    ) -> PointerDispatch {
        let context = DispatchContext::new(PointerLifecyclePhase::PointerDown, Some(pointer_id))
            .item(Some(item.clone()))
            .position(position);
        if pointer_id == 0 {
            return self.ignored(context, PointerIgnoredReason::InvalidPointerId);
        }
        if button != self.activation_button {
            return self.ignored(context, PointerIgnoredReason::ButtonNotAllowed);
        }
        if self.active.is_some() {
            return self.ignored(context, PointerIgnoredReason::ActivePointerAlreadyInProgress);
        }

        let transition = self.surface.pointer_down(item, position);
        if !matches!(transition.effect, DragEffect::Started { .. }) {
            return self.forward(context, transition, None);
        }
        self.active = Some(ActivePointer {
            pointer_id,
            item: item.clone(),
            button,
            capture_state: CaptureState::Requested,
        });
        self.forward(context, transition, Some(HostCommand::AcquireCapture { pointer_id }))
    }

    /// Mark browser pointer capture as successfully acquired.
    pub fn capture_acquired(&mut self, pointer_id: u32) -> PointerDispatch {
        let context = DispatchContext::new(PointerLifecyclePhase::CaptureAcquired, Some(pointer_id));
        let Some(active) = self.active.as_mut() else {
            return self.ignored(context, PointerIgnoredReason::NoActivePointer);
        };
        if active.pointer_id != pointer_id {
            let item = Some(active.item.clone());
            return self.ignored(context.item(item), PointerIgnoredReason::PointerMismatch);
        }
        active.capture_state = CaptureState::Acquired;
        let item = Some(active.item.clone());
        self.logged(context.item(item), None, None, PointerLogOutcome::CaptureStateUpdated)
    }

    /// Handle pointer-move during an active drag.
    pub fn pointer_move(&mut self, pointer_id: u32, position: Point) -> PointerDispatch {
        let context = DispatchContext::new(PointerLifecyclePhase::PointerMove, Some(pointer_id)).position(position);
        let context = match self.check_active(context) {
            Ok(context) => context,
            Err(dispatch) => return *dispatch,
        };
        match self.surface.pointer_move(position) {
            SampleOutcome::FrameRequested => self.logged(
                context,
                None,
                Some(HostCommand::RequestAnimationFrame),
                PointerLogOutcome::SampleQueued,
            ),
            SampleOutcome::Coalesced => self.logged(context, None, None, PointerLogOutcome::SampleCoalesced),
            SampleOutcome::Inactive => self.ignored(context, PointerIgnoredReason::NoActivePointer),
        }
    }

    /// Process the pending sample from a `requestAnimationFrame` callback.
    pub fn animation_frame(&mut self) -> PointerDispatch {
        let pointer_id = self.active_pointer_id();
        let item = self.active.as_ref().map(|active| active.item.clone());
        let context = DispatchContext::new(PointerLifecyclePhase::AnimationFrame, pointer_id).item(item);
        if self.active.is_none() {
            return self.ignored(context, PointerIgnoredReason::NoActivePointer);
        }
        let transition = self.surface.animation_frame();
        self.forward(context, transition, None)
    }

    /// Handle pointer-up; commits or cancels and releases capture.
    pub fn pointer_up(&mut self, pointer_id: u32, button: PointerButton, position: Point) -> PointerDispatch {
        let context = DispatchContext::new(PointerLifecyclePhase::PointerUp, Some(pointer_id)).position(position);
        let context = match self.check_active(context) {
            Ok(context) => context,
            Err(dispatch) => return *dispatch,
        };
        if self.active.as_ref().is_some_and(|active| active.button != button) {
            return self.ignored(context, PointerIgnoredReason::ButtonMismatch);
        }
        let command = self.release_command(true);
        let transition = self.surface.pointer_up(position);
        self.forward(context, transition, command)
    }

    /// Handle browser pointer-cancel events.
    pub fn pointer_cancel(&mut self, pointer_id: Option<u32>) -> PointerDispatch {
        self.cancel_active(
            PointerLifecyclePhase::PointerCancel,
            pointer_id,
            CancelReason::PointerCancel,
            true,
        )
    }

    /// Handle pointer-leave. A captured pointer keeps delivering events, so
    /// leave only matters before capture is acknowledged.
    pub fn pointer_leave(&mut self, pointer_id: u32) -> PointerDispatch {
        let context = DispatchContext::new(PointerLifecyclePhase::PointerLeave, Some(pointer_id));
        let context = match self.check_active(context) {
            Ok(context) => context,
            Err(dispatch) => return *dispatch,
        };
        if self
            .active
            .as_ref()
            .is_some_and(|active| active.capture_state.is_acquired())
        {
            return self.ignored(context, PointerIgnoredReason::LeaveWhileCaptured);
        }
        let transition = self.surface.pointer_leave();
        self.forward(context, transition, None)
    }

    /// Handle the Escape key.
    pub fn escape(&mut self) -> PointerDispatch {
        self.cancel_active(PointerLifecyclePhase::EscapeKey, None, CancelReason::Escape, true)
    }

    /// Handle window blur.
    pub fn blur(&mut self) -> PointerDispatch {
        self.cancel_active(PointerLifecyclePhase::Blur, None, CancelReason::Blur, true)
    }

    /// Handle visibility-hidden interruptions.
    pub fn visibility_hidden(&mut self) -> PointerDispatch {
        self.cancel_active(
            PointerLifecyclePhase::VisibilityHidden,
            None,
            CancelReason::FocusLost,
            true,
        )
    }

    /// Handle `lostpointercapture`; the browser already released capture.
    pub fn lost_pointer_capture(&mut self, pointer_id: u32) -> PointerDispatch {
        self.cancel_active(
            PointerLifecyclePhase::LostPointerCapture,
            Some(pointer_id),
            CancelReason::PointerCancel,
            false,
        )
    }

    fn cancel_active(
        &mut self,
        phase: PointerLifecyclePhase,
        pointer_id: Option<u32>,
        reason: CancelReason,
        release_capture: bool,
    ) -> PointerDispatch {
        let context = DispatchContext::new(phase, pointer_id);
        let Some(active) = self.active.as_ref() else {
            return self.ignored(context, PointerIgnoredReason::NoActivePointer);
        };
        if let Some(id) = pointer_id
            && id != active.pointer_id
        {
            let item = Some(active.item.clone());
            return self.ignored(context.item(item), PointerIgnoredReason::PointerMismatch);
        }
        let context = DispatchContext {
            pointer_id: Some(active.pointer_id),
            item: Some(active.item.clone()),
            ..context
        };
        let command = self.release_command(release_capture);
        let transition = self.surface.cancel(reason);
        self.forward(context, transition, command)
    }

    /// Reject signals without an active pointer or from another pointer.
    fn check_active(&mut self, context: DispatchContext) -> Result<DispatchContext, Box<PointerDispatch>> {
        let Some(active) = self.active.as_ref() else {
            return Err(Box::new(self.ignored(context, PointerIgnoredReason::NoActivePointer)));
        };
        let item = Some(active.item.clone());
        if Some(active.pointer_id) != context.pointer_id {
            return Err(Box::new(self.ignored(context.item(item), PointerIgnoredReason::PointerMismatch)));
        }
        Ok(context.item(item))
    }

    fn release_command(&self, release_capture: bool) -> Option<HostCommand> {
        let active = self.active.as_ref()?;
        (release_capture && active.capture_state.is_acquired()).then_some(HostCommand::ReleaseCapture {
            pointer_id: active.pointer_id,
        })
    }

    fn forward(
        &mut self,
        context: DispatchContext,
        transition: DragTransition,
        command: Option<HostCommand>,
    ) -> PointerDispatch {
        if transition.to == DragPhase::Idle {
            self.active = None;
        }
        let outcome = if transition.is_noop() {
            PointerLogOutcome::Ignored(PointerIgnoredReason::SurfaceNoop)
        } else {
            PointerLogOutcome::Forwarded
        };
        self.logged(context, Some(transition), command, outcome)
    }

    fn ignored(&mut self, context: DispatchContext, reason: PointerIgnoredReason) -> PointerDispatch {
        self.logged(context, None, None, PointerLogOutcome::Ignored(reason))
    }

    fn logged(
        &mut self,
        context: DispatchContext,
        transition: Option<DragTransition>,
        command: Option<HostCommand>,
        outcome: PointerLogOutcome,
    ) -> PointerDispatch {
        let sequence = self.next_sequence();
        dragkit_core::trace!(
            sequence,
            phase = ?context.phase,
            pointer_id = ?context.pointer_id,
            outcome = ?outcome,
            "pointer.dispatch"
        );
        PointerDispatch {
            transition,
            command,
            log: PointerLogEntry {
                sequence,
                phase: context.phase,
                pointer_id: context.pointer_id,
                item: context.item,
                position: context.position,
                command,
                outcome,
            },
        }
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragkit_core::geometry::{Axis, Rect};
    use dragkit_core::id::ContainerId;
    use dragkit_surface::{DragCommit, NoopReason};

    fn adapter() -> PointerCaptureAdapter {
        let mut adapter =
            PointerCaptureAdapter::new(PointerCaptureConfig::default()).expect("default config should be valid");
        let list = ContainerId::from("list");
        let registry = adapter.surface_mut().registry_mut();
        registry.register_container(list.clone(), Rect::new(0.0, 0.0, 100.0, 120.0), Axis::Vertical);
        for (i, name) in ["A", "B", "C"].into_iter().enumerate() {
            registry.register_item(&list, name, Rect::new(0.0, i as f32 * 40.0, 100.0, 40.0));
        }
        adapter
    }

    fn item(name: &str) -> ItemId {
        ItemId::from(name)
    }

    #[test]
    fn pointer_down_requests_capture() {
        let mut adapter = adapter();
        let dispatch = adapter.pointer_down(&item("A"), 7, PointerButton::Primary, Point::new(10.0, 10.0));
        assert_eq!(dispatch.command, Some(HostCommand::AcquireCapture { pointer_id: 7 }));
        assert_eq!(dispatch.log.outcome, PointerLogOutcome::Forwarded);
        assert_eq!(dispatch.log.sequence, 1);
        assert_eq!(adapter.active_pointer_id(), Some(7));
        assert!(adapter.surface().is_dragging());
    }

    #[test]
    fn invalid_pointer_and_button_are_ignored() {
        let mut adapter = adapter();
        let zero = adapter.pointer_down(&item("A"), 0, PointerButton::Primary, Point::new(10.0, 10.0));
        assert_eq!(
            zero.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::InvalidPointerId)
        );
        let right = adapter.pointer_down(&item("A"), 3, PointerButton::Secondary, Point::new(10.0, 10.0));
        assert_eq!(
            right.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::ButtonNotAllowed)
        );
        assert_eq!(right.transition, None);
        assert!(!adapter.surface().is_dragging());
    }

    #[test]
    fn unknown_item_forwards_surface_noop() {
        let mut adapter = adapter();
        let dispatch = adapter.pointer_down(&item("Z"), 1, PointerButton::Primary, Point::new(10.0, 10.0));
        assert_eq!(dispatch.command, None);
        assert_eq!(
            dispatch.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::SurfaceNoop)
        );
        assert_eq!(
            dispatch.transition.map(|transition| transition.effect),
            Some(DragEffect::Noop {
                reason: NoopReason::UnknownItem
            })
        );
        assert_eq!(adapter.active_pointer_id(), None);
    }

    #[test]
    fn second_pointer_is_rejected_while_active() {
        let mut adapter = adapter();
        adapter.pointer_down(&item("A"), 1, PointerButton::Primary, Point::new(10.0, 10.0));
        let second = adapter.pointer_down(&item("B"), 2, PointerButton::Primary, Point::new(10.0, 50.0));
        assert_eq!(
            second.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::ActivePointerAlreadyInProgress)
        );
        let foreign = adapter.pointer_move(2, Point::new(10.0, 90.0));
        assert_eq!(
            foreign.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::PointerMismatch)
        );
    }

    #[test]
    fn moves_request_one_frame_until_processed() {
        let mut adapter = adapter();
        adapter.pointer_down(&item("A"), 1, PointerButton::Primary, Point::new(10.0, 10.0));
        let first = adapter.pointer_move(1, Point::new(10.0, 60.0));
        assert_eq!(first.command, Some(HostCommand::RequestAnimationFrame));
        assert_eq!(first.log.outcome, PointerLogOutcome::SampleQueued);
        let second = adapter.pointer_move(1, Point::new(10.0, 70.0));
        assert_eq!(second.command, None);
        assert_eq!(second.log.outcome, PointerLogOutcome::SampleCoalesced);

        let frame = adapter.animation_frame();
        assert_eq!(frame.log.outcome, PointerLogOutcome::Forwarded);
        assert!(frame.transition.as_ref().and_then(DragTransition::indicator).is_some());

        let again = adapter.pointer_move(1, Point::new(10.0, 75.0));
        assert_eq!(again.command, Some(HostCommand::RequestAnimationFrame));
    }

    #[test]
    fn pointer_up_commits_and_releases_acquired_capture() {
        let mut adapter = adapter();
        adapter.pointer_down(&item("A"), 5, PointerButton::Primary, Point::new(10.0, 10.0));
        adapter.capture_acquired(5);
        adapter.pointer_move(5, Point::new(10.0, 110.0));
        adapter.animation_frame();
        let up = adapter.pointer_up(5, PointerButton::Primary, Point::new(10.0, 110.0));
        assert!(up.is_commit());
        assert_eq!(up.command, Some(HostCommand::ReleaseCapture { pointer_id: 5 }));
        assert_eq!(
            up.transition.as_ref().and_then(DragTransition::commit),
            Some(&DragCommit::Reorder {
                container: ContainerId::from("list"),
                item: item("A"),
                order: vec![item("B"), item("C"), item("A")],
            })
        );
        assert_eq!(adapter.active_pointer_id(), None);
    }

    #[test]
    fn pointer_up_before_capture_ack_skips_release() {
        let mut adapter = adapter();
        adapter.pointer_down(&item("A"), 5, PointerButton::Primary, Point::new(10.0, 10.0));
        let up = adapter.pointer_up(5, PointerButton::Primary, Point::new(10.0, 110.0));
        assert_eq!(up.command, None);
        assert!(up.is_commit());
    }

    #[test]
    fn pointer_up_with_other_button_is_ignored() {
        let mut adapter = adapter();
        adapter.pointer_down(&item("A"), 5, PointerButton::Primary, Point::new(10.0, 10.0));
        let up = adapter.pointer_up(5, PointerButton::Middle, Point::new(10.0, 110.0));
        assert_eq!(
            up.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::ButtonMismatch)
        );
        assert!(adapter.surface().is_dragging());
    }

    #[test]
    fn leave_is_ignored_once_captured() {
        let mut adapter = adapter();
        adapter.pointer_down(&item("A"), 4, PointerButton::Primary, Point::new(10.0, 10.0));
        adapter.capture_acquired(4);
        let leave = adapter.pointer_leave(4);
        assert_eq!(
            leave.log.outcome,
            PointerLogOutcome::Ignored(PointerIgnoredReason::LeaveWhileCaptured)
        );
        assert!(adapter.surface().is_dragging());
    }

    #[test]
    fn leave_before_capture_follows_surface_config() {
        let mut adapter = adapter();
        adapter.pointer_down(&item("A"), 4, PointerButton::Primary, Point::new(10.0, 10.0));
        let leave = adapter.pointer_leave(4);
        let cancel_on_leave = adapter.surface().config().cancel_on_leave;
        assert_eq!(adapter.surface().is_dragging(), !cancel_on_leave);
        if cancel_on_leave {
            assert_eq!(leave.log.outcome, PointerLogOutcome::Forwarded);
            assert_eq!(adapter.active_pointer_id(), None);
        } else {
            assert_eq!(
                leave.log.outcome,
                PointerLogOutcome::Ignored(PointerIgnoredReason::SurfaceNoop)
            );
        }
    }

    #[test]
    fn interruptions_cancel_with_reason() {
        let cases = [
            (PointerLifecyclePhase::EscapeKey, CancelReason::Escape),
            (PointerLifecyclePhase::Blur, CancelReason::Blur),
            (PointerLifecyclePhase::VisibilityHidden, CancelReason::FocusLost),
            (PointerLifecyclePhase::PointerCancel, CancelReason::PointerCancel),
        ];
        for (phase, reason) in cases {
            let mut adapter = adapter();
            adapter.pointer_down(&item("B"), 9, PointerButton::Primary, Point::new(10.0, 50.0));
            adapter.capture_acquired(9);
            let dispatch = match phase {
                PointerLifecyclePhase::EscapeKey => adapter.escape(),
                PointerLifecyclePhase::Blur => adapter.blur(),
                PointerLifecyclePhase::VisibilityHidden => adapter.visibility_hidden(),
                _ => adapter.pointer_cancel(Some(9)),
            };
            assert_eq!(dispatch.log.phase, phase);
            assert_eq!(dispatch.command, Some(HostCommand::ReleaseCapture { pointer_id: 9 }));
            assert_eq!(
                dispatch.transition.map(|transition| transition.effect),
                Some(DragEffect::Cancelled {
                    source_id: item("B"),
                    reason,
                })
            );
            assert_eq!(adapter.active_pointer_id(), None);
        }
    }

    #[test]
    fn lost_capture_cancels_without_release() {
        let mut adapter = adapter();
        adapter.pointer_down(&item("A"), 2, PointerButton::Primary, Point::new(10.0, 10.0));
        adapter.capture_acquired(2);
        let lost = adapter.lost_pointer_capture(2);
        assert_eq!(lost.command, None);
        assert_eq!(lost.log.outcome, PointerLogOutcome::Forwarded);
        assert!(!adapter.surface().is_dragging());
    }

    #[test]
    fn idle_signals_are_ignored() {
        let mut adapter = adapter();
        for dispatch in [
            adapter.escape(),
            adapter.animation_frame(),
            adapter.capture_acquired(1),
            adapter.pointer_move(1, Point::new(0.0, 0.0)),
        ] {
            assert_eq!(
                dispatch.log.outcome,
                PointerLogOutcome::Ignored(PointerIgnoredReason::NoActivePointer)
            );
        }
    }

    #[test]
    fn sequence_increases_on_every_dispatch() {
        let mut adapter = adapter();
        let sequences = [
            adapter.pointer_move(1, Point::new(0.0, 0.0)).log.sequence,
            adapter
                .pointer_down(&item("A"), 1, PointerButton::Primary, Point::new(10.0, 10.0))
                .log
                .sequence,
            adapter.capture_acquired(1).log.sequence,
            adapter.blur().log.sequence,
        ];
        assert_eq!(sequences, [1, 2, 3, 4]);
    }

    #[test]
    fn invalid_config_is_reported() {
        let config = PointerCaptureConfig {
            drag: DragConfig {
                threshold: -1.0,
                ..DragConfig::default()
            },
            ..PointerCaptureConfig::default()
        };
        let err = PointerCaptureAdapter::new(config).expect_err("negative threshold");
        assert!(matches!(err, PointerCaptureError::InvalidConfig(_)));
        assert!(err.to_string().starts_with("invalid drag config"));
    }
}
