//! FILENAME: core/persistence/src/csv_reader.rs
//! Reads delimited text into a `Table`. Every cell is kept as text except
//! the usual "not available" markers, which become `Empty`.

use crate::{header_name, PersistenceError};
use csv::ReaderBuilder;
use roster::{RawValue, Table};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Cell contents read as missing values. Matched against the whole cell,
/// so a padded `" NA "` stays text.
pub const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True when `field` is exactly one of the [`NA_MARKERS`].
pub fn is_na_marker(field: &str) -> bool {
    NA_MARKERS.contains(&field)
}

fn to_raw(field: &str) -> RawValue {
    if is_na_marker(field) {
        RawValue::Empty
    } else {
        RawValue::Text(field.to_string())
    }
}

/// Reads CSV from any reader. The first record holds the headers; rows may
/// have differing lengths.
pub fn read_csv<R: Read>(reader: R) -> Result<Table, PersistenceError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, h)| header_name(idx, h.trim_start_matches('\u{feff}')))
        .collect();
    let mut table = Table::new(headers);

    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(to_raw).collect());
    }

    Ok(table)
}

/// Loads a CSV file.
pub fn load_csv(path: &Path) -> Result<Table, PersistenceError> {
    let file = File::open(path)?;
    let table = read_csv(file)?;
    log::info!(
        "loaded csv {:?}: {} rows, {} columns",
        path,
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}
