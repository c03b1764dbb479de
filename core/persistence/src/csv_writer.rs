//! FILENAME: core/persistence/src/csv_writer.rs
//! CSV export of filtered rows, hierarchy tables and cross-tabulations.

use crate::PersistenceError;
use csv::WriterBuilder;
use pivot_engine::{AggregateTable, CrossTab};
use roster::{RecordSet, SchemaConfig, Table};
use std::io::Write;

/// Writes the source rows of `records` with every original column, in the
/// original header order.
pub fn write_records_csv<W: Write>(
    writer: W,
    table: &Table,
    records: &RecordSet,
) -> Result<(), PersistenceError> {
    let mut out = WriterBuilder::new().flexible(false).from_writer(writer);
    out.write_record(&table.headers)?;

    let width = table.column_count();
    for record in records.iter() {
        out.write_record((0..width).map(|col| table.value(record.source_row, col).display_value()))?;
    }
    out.flush()?;
    Ok(())
}

/// Writes a hierarchy table as a detail table: level columns renamed to
/// their labels, then count and percentage columns. Rows are ordered by
/// count, largest first.
pub fn write_aggregate_csv<W: Write>(
    writer: W,
    table: &AggregateTable,
    config: &SchemaConfig,
) -> Result<(), PersistenceError> {
    let mut out = WriterBuilder::new().from_writer(writer);

    let mut header: Vec<&str> = table.level_labels.iter().map(String::as_str).collect();
    header.push(&config.count_label);
    header.push(&config.percentage_label);
    out.write_record(&header)?;

    for row in table.by_count_desc().rows {
        let mut line: Vec<String> = row.labels.into_iter().collect();
        line.push(row.count.to_string());
        line.push(format!("{:.2}", row.percentage));
        out.write_record(&line)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes a cross-tabulation including its total row and column.
pub fn write_crosstab_csv<W: Write>(writer: W, tab: &CrossTab) -> Result<(), PersistenceError> {
    let mut out = WriterBuilder::new().from_writer(writer);
    for line in tab.to_grid() {
        out.write_record(&line)?;
    }
    out.flush()?;
    Ok(())
}

/// File name for the filtered-data export, e.g. `data_filter_III-IV.csv`.
pub fn filtered_file_name(rank_label: &str) -> String {
    format!("data_filter_{}.csv", rank_label.replace('/', "-"))
}
