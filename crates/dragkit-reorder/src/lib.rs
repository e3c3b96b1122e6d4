#![forbid(unsafe_code)]

//! Reorder engine.
//!
//! Deterministic list operations applied when a drag commits:
//!
//! - [`reorder`]: move one item before or after another in the same list.
//! - [`move_cross_container`]: move one item into another list at an index.
//! - [`columns::split_into_columns`]: place an item in a new column beside a
//!   target, bounded by [`columns::ColumnLimits`].
//!
//! All of them work on any `E: Keyed + Clone`, so the same code reorders
//! host items with payloads, bare [`ItemId`](dragkit_core::ItemId)s, and
//! registered geometry.

pub mod columns;
pub mod reorder;

pub use columns::{ColumnGroup, ColumnLimits, ColumnSplit, RejectReason, Row, split_into_columns};
pub use reorder::{ContainerExt, CrossContainerMove, move_cross_container, reorder, reorder_to_index};
