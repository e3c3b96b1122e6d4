#![forbid(unsafe_code)]

//! Core: geometry, identities, pointer sampling, and direction classification.
//!
//! # Role in dragkit
//! `dragkit-core` is the vocabulary layer. It owns the value types every
//! other crate speaks ([`geometry::Rect`], [`id::ItemId`], [`item::Container`])
//! plus the two input-side components of a drag:
//!
//! - **PointerTracker**: coalesces pointer moves to one sample per frame.
//! - **DirectionClassifier**: vertical vs horizontal intent with a dead zone.
//!
//! # How it fits in the system
//! `dragkit-layout` hit-tests against registered geometry,
//! `dragkit-reorder` computes new orders, and `dragkit-surface` ties them
//! together into the drag state machine. None of them render anything; the
//! host draws the drop indicator it is handed.

pub mod config;
pub mod direction;
pub mod geometry;
pub mod id;
pub mod item;
pub mod logging;
pub mod pointer;

pub use config::{DragConfig, DragConfigError};
pub use direction::{AxisRestriction, DirectionClassifier, DragDirection, classify};
pub use geometry::{Axis, Edge, Point, Rect};
pub use id::{ContainerId, ItemId};
pub use item::{Container, Item, Keyed};
pub use pointer::{PointerStats, PointerTracker, SampleOutcome};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
