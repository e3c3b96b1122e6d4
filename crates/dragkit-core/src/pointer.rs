#![forbid(unsafe_code)]

//! Frame-coalesced pointer sampling.
//!
//! Pointer-move events can arrive far faster than the host renders. The
//! [`PointerTracker`] keeps at most one pending sample per animation frame
//! using a "latest wins" strategy:
//!
//! - The first sample after a frame boundary asks the host to schedule a
//!   frame ([`SampleOutcome::FrameRequested`]).
//! - Further samples before that frame overwrite the pending one
//!   ([`SampleOutcome::Coalesced`]); nothing is queued.
//! - At the frame boundary the host calls [`PointerTracker::take_frame`] to
//!   drain the pending sample and do the hit-testing work once.
//!
//! # Usage
//!
//! ```
//! use dragkit_core::geometry::Point;
//! use dragkit_core::pointer::{PointerTracker, SampleOutcome};
//!
//! let mut tracker = PointerTracker::new();
//! tracker.start(Point::new(0.0, 0.0));
//!
//! assert_eq!(tracker.sample(Point::new(4.0, 4.0)), SampleOutcome::FrameRequested);
//! assert_eq!(tracker.sample(Point::new(9.0, 9.0)), SampleOutcome::Coalesced);
//!
//! // One frame, one sample: the latest position.
//! assert_eq!(tracker.take_frame(), Some(Point::new(9.0, 9.0)));
//! assert_eq!(tracker.take_frame(), None);
//!
//! assert_eq!(tracker.stop(), Some(Point::new(9.0, 9.0)));
//! ```
//!
//! # Thread Safety
//!
//! `PointerTracker` is not synchronised. It is driven from the single host
//! event loop.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Result of feeding one pointer sample into the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleOutcome {
    /// No session is active; the sample was ignored.
    Inactive,
    /// The sample is pending and the host must schedule an animation frame.
    FrameRequested,
    /// A frame was already pending; the sample replaced the pending one.
    Coalesced,
}

/// Sampling statistics for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerStats {
    /// Samples received while active.
    pub received: u64,
    /// Samples that replaced an already pending sample.
    pub coalesced: u64,
    /// Frames drained with a pending sample.
    pub frames: u64,
}

#[derive(Debug, Clone, Copy)]
struct ActiveTracking {
    initial: Point,
    last_processed: Option<Point>,
    pending: Option<Point>,
}

/// Tracks pointer samples for one drag, coalescing to the frame cadence.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    active: Option<ActiveTracking>,
    stats: PointerStats,
}

impl PointerTracker {
    /// Create an inactive tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin tracking from `initial`. Any previous tracking is discarded.
    pub fn start(&mut self, initial: Point) {
        self.active = Some(ActiveTracking {
            initial,
            last_processed: None,
            pending: None,
        });
        self.stats = PointerStats::default();
    }

    /// Feed one pointer sample.
    pub fn sample(&mut self, pointer: Point) -> SampleOutcome {
        let Some(active) = self.active.as_mut() else {
            return SampleOutcome::Inactive;
        };
        self.stats.received = self.stats.received.saturating_add(1);
        if active.pending.replace(pointer).is_some() {
            self.stats.coalesced = self.stats.coalesced.saturating_add(1);
            SampleOutcome::Coalesced
        } else {
            SampleOutcome::FrameRequested
        }
    }

    /// Drain the pending sample at an animation-frame boundary.
    pub fn take_frame(&mut self) -> Option<Point> {
        let active = self.active.as_mut()?;
        let pointer = active.pending.take()?;
        active.last_processed = Some(pointer);
        self.stats.frames = self.stats.frames.saturating_add(1);
        Some(pointer)
    }

    /// Stop tracking and return the final pointer position.
    ///
    /// The final position is the pending sample if one exists, else the last
    /// processed sample, else the initial pointer. Returns `None` when the
    /// tracker was not active.
    pub fn stop(&mut self) -> Option<Point> {
        let active = self.active.take()?;
        Some(
            active
                .pending
                .or(active.last_processed)
                .unwrap_or(active.initial),
        )
    }

    /// Whether a drag is being tracked.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether a sample is waiting for the next frame.
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.active.is_some_and(|active| active.pending.is_some())
    }

    /// Most recent known position (pending, processed, or initial).
    #[must_use]
    pub fn latest(&self) -> Option<Point> {
        self.active.map(|active| {
            active
                .pending
                .or(active.last_processed)
                .unwrap_or(active.initial)
        })
    }

    /// Statistics for the current (or last started) tracking session.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> PointerStats {
        self.stats
    }
}
