#![forbid(unsafe_code)]

//! Drag surface: session state, lifecycle machine, and visual feedback.
//!
//! A [`DragSurface`] owns the registered geometry of one interactive area
//! and drives at most one drag at a time:
//!
//! 1. `pointer_down` on a registered item starts a [`DragSession`].
//! 2. `pointer_move` samples are coalesced to one per animation frame.
//! 3. `animation_frame` classifies direction, hit-tests, and projects a
//!    [`DropIndicator`].
//! 4. `pointer_up` commits a [`DragCommit`] or cancels.
//!
//! Hosts apply commits to their own data, directly or through a
//! [`DropHandler`].

pub mod feedback;
pub mod session;
pub mod surface;

pub use feedback::{DropIndicator, DropIntent, IndicatorOrientation, IndicatorStyle, project};
pub use session::DragSession;
pub use surface::{
    CancelReason, DragCommit, DragEffect, DragPhase, DragSurface, DragTransition, DropHandler,
    NoopReason,
};
