//! FILENAME: core/pivot-engine/src/crosstab.rs
//! Cross-Tabulation Builder - Counts one dimension against another.
//!
//! Missing values are kept as their own category, labelled with the
//! dimension's placeholder (the same policy the aggregator uses).
//! Categories are ordered like aggregation keys: by rank key when the
//! dimension is the rank tier, then by value with missing last.

use std::collections::BTreeMap;
use rustc_hash::FxHashMap;
use roster::{CategoryValue, Dimension, RankKey, Record, RecordSet, SchemaConfig};
use crate::engine::check_dimension;
use crate::error::AggregateError;
use crate::view::CrossTab;

static MISSING: CategoryValue = CategoryValue::Missing;

/// Sort key of a category on one axis.
type AxisKey<'r> = (Option<RankKey>, &'r CategoryValue);

fn axis_key<'r>(record: &'r Record, dimension: Dimension) -> AxisKey<'r> {
    let rank = match dimension {
        Dimension::RankTier => Some(record.rank_key),
        _ => None,
    };
    (rank, record.get(dimension).unwrap_or(&MISSING))
}

/// Ordered distinct categories of one axis, with their positions.
fn collect_axis<'r>(records: &'r RecordSet, dimension: Dimension) -> BTreeMap<AxisKey<'r>, usize> {
    let mut axis: BTreeMap<AxisKey<'r>, usize> = records
        .iter()
        .map(|record| (axis_key(record, dimension), 0))
        .collect();
    for (i, slot) in axis.values_mut().enumerate() {
        *slot = i;
    }
    axis
}

/// Builds the `row` × `column` count matrix of `records`.
pub fn cross_tab(
    records: &RecordSet,
    row: Dimension,
    column: Dimension,
    config: &SchemaConfig,
) -> Result<CrossTab, AggregateError> {
    check_dimension(records, row, config)?;
    check_dimension(records, column, config)?;

    let row_axis = collect_axis(records, row);
    let column_axis = collect_axis(records, column);

    let mut counts = vec![vec![0usize; column_axis.len()]; row_axis.len()];
    // Cell lookups go through a hash index; the BTreeMaps only fix the order.
    let row_index: FxHashMap<&AxisKey, usize> = row_axis.iter().map(|(k, v)| (k, *v)).collect();
    let column_index: FxHashMap<&AxisKey, usize> = column_axis.iter().map(|(k, v)| (k, *v)).collect();

    for record in records.iter() {
        let r = row_index[&axis_key(record, row)];
        let c = column_index[&axis_key(record, column)];
        counts[r][c] += 1;
    }

    let row_totals: Vec<usize> = counts.iter().map(|line| line.iter().sum()).collect();
    let column_totals: Vec<usize> = (0..column_axis.len())
        .map(|c| counts.iter().map(|line| line[c]).sum())
        .collect();
    let grand_total = row_totals.iter().sum();

    let row_placeholder = config.placeholder(row);
    let column_placeholder = config.placeholder(column);

    log::debug!(
        "cross_tab {} x {}: {} x {} categories, {} records",
        row,
        column,
        row_axis.len(),
        column_axis.len(),
        records.len()
    );

    Ok(CrossTab {
        row_dimension: row,
        column_dimension: column,
        row_header: config.label(row),
        total_label: config.total_label.clone(),
        row_keys: row_axis.keys().map(|(_, v)| (*v).clone()).collect(),
        row_labels: row_axis
            .keys()
            .map(|(_, v)| v.label_or(&row_placeholder).to_string())
            .collect(),
        column_keys: column_axis.keys().map(|(_, v)| (*v).clone()).collect(),
        column_labels: column_axis
            .keys()
            .map(|(_, v)| v.label_or(&column_placeholder).to_string())
            .collect(),
        counts,
        row_totals,
        column_totals,
        grand_total,
    })
}
