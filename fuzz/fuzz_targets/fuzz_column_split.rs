#![no_main]

use arbitrary::Arbitrary;
use dragkit_core::geometry::Edge;
use dragkit_core::id::ItemId;
use dragkit_reorder::{ColumnGroup, ColumnLimits, ColumnSplit, Row, split_into_columns};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    /// Column count per row; 0 or 1 means a single item.
    shape: Vec<u8>,
    source: u8,
    target: u8,
    after: bool,
}

fuzz_target!(|input: Input| {
    let limits = ColumnLimits::default();
    let mut next = 0usize;
    let mut fresh = || {
        next += 1;
        ItemId::new(format!("i{next}"))
    };
    let rows: Vec<Row<ItemId>> = input
        .shape
        .iter()
        .take(16)
        .enumerate()
        .map(|(r, &n)| {
            let n = usize::from(n) % (limits.max + 1);
            if n < limits.min {
                Row::Single(fresh())
            } else {
                Row::Columns(ColumnGroup {
                    id: ItemId::new(format!("g{r}")),
                    columns: (0..n).map(|_| vec![fresh()]).collect(),
                })
            }
        })
        .collect();
    if next == 0 {
        return;
    }
    let source = ItemId::new(format!("i{}", usize::from(input.source) % next + 1));
    let target = ItemId::new(format!("i{}", usize::from(input.target) % next + 1));
    let edge = if input.after { Edge::After } else { Edge::Before };

    let count = |rows: &[Row<ItemId>]| -> usize {
        rows.iter()
            .map(|row| match row {
                Row::Single(_) => 1,
                Row::Columns(group) => group.columns.iter().map(Vec::len).sum(),
            })
            .sum()
    };

    if let ColumnSplit::Applied(out) = split_into_columns(&rows, &source, &target, edge, limits) {
        assert_eq!(count(&out), count(&rows), "items lost or duplicated");
        for row in &out {
            if let Row::Columns(group) = row {
                let n = group.column_count();
                assert!((limits.min..=limits.max).contains(&n), "column count {n} out of range");
                assert!(group.columns.iter().all(|column| !column.is_empty()), "empty column");
            }
        }
    }
});
