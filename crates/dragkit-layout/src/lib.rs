#![forbid(unsafe_code)]

//! Geometry registry and hit testing.
//!
//! Hosts register container and item rectangles into a [`GeometryRegistry`]
//! whenever they mount or resize. During a drag, [`hit_test`] resolves a
//! pointer position against that cache into a [`HitTarget`]: which container,
//! which item, which side of it, and where an insertion would land.

pub mod registry;

pub use dragkit_core::geometry::{Axis, Edge, Point, Rect};
pub use hit_test::{HitTarget, hit_container, hit_test};
pub use registry::{ContainerGeometry, GeometryRegistry, ItemGeometry};
