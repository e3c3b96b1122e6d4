#![forbid(unsafe_code)]

//! dragkit public facade crate.
//!
//! Re-exports the common types of the internal crates and offers a small
//! prelude. A typical host registers geometry, feeds pointer events into a
//! [`DragSurface`] and applies the [`DragCommit`] it gets back:
//!
//! ```
//! use dragkit::prelude::*;
//!
//! let mut surface = DragSurface::new(DragConfig::default())?;
//! let list = ContainerId::from("list");
//! let registry = surface.registry_mut();
//! registry.register_container(list.clone(), Rect::new(0.0, 0.0, 100.0, 120.0), Axis::Vertical);
//! for (i, name) in ["A", "B", "C"].into_iter().enumerate() {
//!     registry.register_item(&list, name, Rect::new(0.0, i as f32 * 40.0, 100.0, 40.0));
//! }
//!
//! surface.pointer_down(&ItemId::from("A"), Point::new(10.0, 10.0));
//! surface.pointer_move(Point::new(10.0, 110.0));
//! surface.animation_frame();
//! let done = surface.pointer_up(Point::new(10.0, 110.0));
//!
//! assert_eq!(
//!     done.commit(),
//!     Some(&DragCommit::Reorder {
//!         container: list.clone(),
//!         item: ItemId::from("A"),
//!         order: vec![ItemId::from("B"), ItemId::from("C"), ItemId::from("A")],
//!     })
//! );
//! # Ok::<(), dragkit::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use dragkit_core::{
    Axis, AxisRestriction, Container, ContainerId, DirectionClassifier, DragConfig, DragConfigError,
    DragDirection, Edge, Item, ItemId, Keyed, Point, PointerTracker, Rect, SampleOutcome, classify,
};

// --- Layout re-exports -----------------------------------------------------

pub use dragkit_layout::{GeometryRegistry, HitTarget, hit_test};

// --- Reorder re-exports ----------------------------------------------------

pub use dragkit_reorder::{
    ColumnLimits, ColumnSplit, ContainerExt, Row, move_cross_container, reorder_to_index, split_into_columns,
};
// Imported by full path so only the function (value namespace) is brought in;
// the `reorder` name in the type namespace is the crate alias below.
pub use dragkit_reorder::reorder::reorder;

// --- Surface re-exports ----------------------------------------------------

pub use dragkit_surface::{
    CancelReason, DragCommit, DragEffect, DragPhase, DragSession, DragSurface, DragTransition,
    DropHandler, DropIndicator, DropIntent,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use dragkit_web::{
    HostCommand, PointerButton, PointerCaptureAdapter, PointerCaptureConfig, PointerCaptureError,
    PointerDispatch,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for dragkit hosts.
#[derive(Debug)]
pub enum Error {
    /// Invalid or unreadable drag configuration.
    Config(DragConfigError),
    /// Pointer-capture adapter construction failed.
    #[cfg(feature = "web")]
    PointerCapture(PointerCaptureError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            #[cfg(feature = "web")]
            Self::PointerCapture(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            #[cfg(feature = "web")]
            Self::PointerCapture(err) => Some(err),
        }
    }
}

impl From<DragConfigError> for Error {
    fn from(err: DragConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(feature = "web")]
impl From<PointerCaptureError> for Error {
    fn from(err: PointerCaptureError) -> Self {
        Self::PointerCapture(err)
    }
}

/// Standard result type for dragkit APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Axis, Container, ContainerId, DragCommit, DragConfig, DragDirection, DragEffect, DragSurface,
        DragTransition, DropHandler, DropIndicator, Edge, Error, GeometryRegistry, ItemId, Point, Rect,
        Result,
    };

    #[cfg(feature = "web")]
    pub use crate::{HostCommand, PointerButton, PointerCaptureAdapter, PointerCaptureConfig};

    pub use crate::{core, layout, reorder, surface};
}

pub use dragkit_core as core;
pub use dragkit_layout as layout;
pub use dragkit_reorder as reorder;
pub use dragkit_surface as surface;
#[cfg(feature = "web")]
pub use dragkit_web as web;
