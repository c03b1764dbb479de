// FILENAME: core\persistence\src\xlsx_reader.rs

use crate::{header_name, is_na_marker, PersistenceError};
use calamine::{open_workbook, Data, Reader, Xlsx};
use roster::{RawValue, Table};
use std::path::Path;

fn to_raw(cell: &Data) -> RawValue {
    match cell {
        Data::Empty => RawValue::Empty,
        Data::String(s) if is_na_marker(s) => RawValue::Empty,
        Data::String(s) => RawValue::Text(s.clone()),
        Data::Float(f) => RawValue::Number(*f),
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::Bool(b) => RawValue::Boolean(*b),
        // Error cells (#N/A, #REF!, ...) carry no category
        Data::Error(_) => RawValue::Empty,
        Data::DateTime(dt) => RawValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => RawValue::Text(s.clone()),
        Data::DurationIso(s) => RawValue::Text(s.clone()),
    }
}

/// Loads the first worksheet of an XLSX file. The first row holds the headers.
pub fn load_xlsx(path: &Path) -> Result<Table, PersistenceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let first = sheet_names.first().ok_or_else(|| {
        PersistenceError::InvalidFormat("Workbook contains no sheets".to_string())
    })?;

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| PersistenceError::InvalidFormat(e.to_string()))?;

    let mut rows = range.rows();
    let header_row = rows.next().ok_or_else(|| {
        PersistenceError::InvalidFormat(format!("Sheet '{}' has no header row", first))
    })?;

    let headers = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| header_name(idx, &to_raw(cell).display_value()))
        .collect();
    let mut table = Table::new(headers);

    for row in rows {
        table.push_row(row.iter().map(to_raw).collect());
    }

    log::info!(
        "loaded xlsx {:?} sheet '{}': {} rows, {} columns",
        path,
        first,
        table.row_count(),
        table.column_count()
    );

    Ok(table)
}
