//! FILENAME: core/persistence/src/lib.rs
//! Personnel Persistence Module
//!
//! Loads roster exports (CSV or XLSX) into a `roster::Table` and writes the
//! filtered rows, hierarchy tables and cross-tabulations back out as CSV.

mod csv_reader;
mod csv_writer;
mod error;
mod xlsx_reader;

pub use csv_reader::{is_na_marker, load_csv, read_csv, NA_MARKERS};
pub use csv_writer::{
    filtered_file_name, write_aggregate_csv, write_crosstab_csv, write_records_csv,
};
pub use error::PersistenceError;
pub use xlsx_reader::load_xlsx;

use roster::Table;
use std::path::Path;

// ============================================================================
// HEADERS
// ============================================================================

/// Header text for column `idx`. Blank headers get a positional name so
/// every column stays addressable.
pub(crate) fn header_name(idx: usize, raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        format!("Unnamed: {}", idx)
    } else {
        trimmed.to_string()
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Loads a roster file, choosing the reader by extension (`.csv` or `.xlsx`,
/// case-insensitive).
pub fn load_table(path: &Path) -> Result<Table, PersistenceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => load_csv(path),
        "xlsx" => load_xlsx(path),
        _ => {
            log::error!("refusing to load {:?}: unsupported extension", path);
            Err(PersistenceError::UnsupportedExtension(
                path.display().to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_are_trimmed() {
        assert_eq!(header_name(0, "  eselon "), "eselon");
        assert_eq!(header_name(3, "   "), "Unnamed: 3");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_table(Path::new("roster.ods")).unwrap_err();
        assert!(matches!(err, PersistenceError::UnsupportedExtension(_)));

        let err = load_table(Path::new("roster")).unwrap_err();
        assert!(matches!(err, PersistenceError::UnsupportedExtension(_)));
    }
}
