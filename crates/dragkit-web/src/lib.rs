#![forbid(unsafe_code)]

//! `dragkit-web` adapts browser pointer events to a [`DragSurface`].
//!
//! Design goals:
//! - **Host-driven**: JS pushes DOM events in and executes the returned
//!   [`HostCommand`]s (capture acquire/release, animation-frame requests).
//! - **Deterministic**: every dispatch carries a sequenced log entry, so a
//!   recorded interaction replays to the same commits.
//! - **No bindings**: this crate does not depend on `wasm-bindgen`; a thin
//!   host wrapper owns that surface.
//!
//! [`DragSurface`]: dragkit_surface::DragSurface

pub mod pointer_capture;

pub use pointer_capture::{
    HostCommand, PointerButton, PointerCaptureAdapter, PointerCaptureConfig, PointerCaptureError,
    PointerDispatch, PointerIgnoredReason, PointerLifecyclePhase, PointerLogEntry, PointerLogOutcome,
};
