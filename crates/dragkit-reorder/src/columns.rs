#![forbid(unsafe_code)]

//! Column split: turning a linear drop into a side-by-side grouping.
//!
//! A document is a sequence of [`Row`]s. A row is either a single item or a
//! [`ColumnGroup`] of two or more columns, each column a vertical run of
//! items. A perpendicular drop onto a target either wraps a single target
//! row into a fresh two-column group, or adds a new column to the target's
//! existing group.
//!
//! # Invariants
//!
//! 1. A group never has fewer than `limits.min` columns after a split; a
//!    group that falls below the floor is dissolved into single rows.
//! 2. A group never grows past `limits.max`; such a split is
//!    [`ColumnSplit::Rejected`] and the input is left untouched.
//! 3. No column is ever empty.

use std::fmt;

use dragkit_core::config::{DEFAULT_MAX_COLUMNS, DEFAULT_MIN_COLUMNS, DragConfig};
use dragkit_core::geometry::Edge;
use dragkit_core::id::ItemId;
use dragkit_core::item::Keyed;
use serde::{Deserialize, Serialize};

/// Floor and ceiling on the number of columns in a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLimits {
    pub min: usize,
    pub max: usize,
}

impl Default for ColumnLimits {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_COLUMNS,
            max: DEFAULT_MAX_COLUMNS,
        }
    }
}

impl From<&DragConfig> for ColumnLimits {
    fn from(config: &DragConfig) -> Self {
        Self {
            min: config.min_columns,
            max: config.max_columns,
        }
    }
}

/// Side-by-side columns of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGroup<E> {
    pub id: ItemId,
    pub columns: Vec<Vec<E>>,
}

impl<E> ColumnGroup<E> {
    #[inline]
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// One top-level entry of a column-capable container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Row<E> {
    Single(E),
    Columns(ColumnGroup<E>),
}

impl<E: Keyed> Row<E> {
    /// Whether `id` is this row's item or sits anywhere in its group.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        match self {
            Self::Single(item) => item.key() == id,
            Self::Columns(group) => group.columns.iter().flatten().any(|item| item.key() == id),
        }
    }
}

/// Why a column split did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// Source and target are the same item.
    SameItem,
    UnknownSource,
    UnknownTarget,
    /// The target's group already has `max` columns.
    ColumnCeiling { max: usize },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameItem => write!(f, "source and target are the same item"),
            Self::UnknownSource => write!(f, "source item not found"),
            Self::UnknownTarget => write!(f, "target item not found"),
            Self::ColumnCeiling { max } => write!(f, "column group already has {max} columns"),
        }
    }
}

/// Outcome of [`split_into_columns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum ColumnSplit<E> {
    Applied(Vec<Row<E>>),
    Rejected(RejectReason),
}

impl<E> ColumnSplit<E> {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// The new rows, or `None` when rejected.
    #[must_use]
    pub fn applied(self) -> Option<Vec<Row<E>>> {
        match self {
            Self::Applied(rows) => Some(rows),
            Self::Rejected(_) => None,
        }
    }
}

/// Group id used when a single target row is wrapped into columns.
///
/// The id is `"{target}/columns"`, suffixed `#2`, `#3`, ... when a group in
/// `rows` already uses it, so ids stay unique within one document.
#[must_use]
pub fn group_id_for<E>(rows: &[Row<E>], target: &ItemId) -> ItemId {
    let taken = |candidate: &ItemId| {
        rows.iter()
            .any(|row| matches!(row, Row::Columns(group) if &group.id == candidate))
    };
    let base = ItemId::new(format!("{target}/columns"));
    if !taken(&base) {
        return base;
    }
    (2usize..)
        .map(|n| ItemId::new(format!("{base}#{n}")))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}

/// Place `source` in a new column beside `target`.
///
/// `edge` picks the side: [`Edge::Before`] puts the new column to the left
/// of the target's column, [`Edge::After`] to the right.
#[must_use]
pub fn split_into_columns<E: Keyed + Clone>(
    rows: &[Row<E>],
    source: &ItemId,
    target: &ItemId,
    edge: Edge,
    limits: ColumnLimits,
) -> ColumnSplit<E> {
    if source == target {
        return ColumnSplit::Rejected(RejectReason::SameItem);
    }
    if !rows.iter().any(|row| row.contains(target)) {
        return ColumnSplit::Rejected(RejectReason::UnknownTarget);
    }
    let mut work = rows.to_vec();
    let Some(moved) = take_item(&mut work, source, limits.min) else {
        return ColumnSplit::Rejected(RejectReason::UnknownSource);
    };

    let Some(row_index) = work.iter().position(|row| row.contains(target)) else {
        return ColumnSplit::Rejected(RejectReason::UnknownTarget);
    };
    if let Row::Single(existing) = &work[row_index] {
        let existing = existing.clone();
        let columns = match edge {
            Edge::Before => vec![vec![moved], vec![existing]],
            Edge::After => vec![vec![existing], vec![moved]],
        };
        let id = group_id_for(&work, target);
        work[row_index] = Row::Columns(ColumnGroup { id, columns });
        return ColumnSplit::Applied(work);
    }

    let Row::Columns(group) = &mut work[row_index] else {
        return ColumnSplit::Rejected(RejectReason::UnknownTarget);
    };
    if group.column_count() >= limits.max {
        dragkit_core::debug!(
            group = %group.id,
            columns = group.column_count(),
            max = limits.max,
            "columns.split.rejected"
        );
        return ColumnSplit::Rejected(RejectReason::ColumnCeiling { max: limits.max });
    }
    let Some(column) = group
        .columns
        .iter()
        .position(|column| column.iter().any(|item| item.key() == target))
    else {
        return ColumnSplit::Rejected(RejectReason::UnknownTarget);
    };
    let at = match edge {
        Edge::Before => column,
        Edge::After => column + 1,
    };
    group.columns.insert(at, vec![moved]);
    ColumnSplit::Applied(work)
}

/// Remove `id` from wherever it sits, repairing the group it leaves.
fn take_item<E: Keyed + Clone>(rows: &mut Vec<Row<E>>, id: &ItemId, min_columns: usize) -> Option<E> {
    let row_index = rows.iter().position(|row| row.contains(id))?;
    if matches!(rows[row_index], Row::Single(_)) {
        return match rows.remove(row_index) {
            Row::Single(item) => Some(item),
            Row::Columns(_) => None,
        };
    }
    let Row::Columns(group) = &mut rows[row_index] else {
        return None;
    };

    let (column, slot) = group.columns.iter().enumerate().find_map(|(c, column)| {
        column
            .iter()
            .position(|item| item.key() == id)
            .map(|slot| (c, slot))
    })?;
    let item = group.columns[column].remove(slot);
    if group.columns[column].is_empty() {
        group.columns.remove(column);
    }
    if group.column_count() < min_columns {
        let remaining: Vec<Row<E>> = group
            .columns
            .drain(..)
            .flatten()
            .map(Row::Single)
            .collect();
        rows.splice(row_index..=row_index, remaining);
    }
    Some(item)
}
