//! FILENAME: core/roster/src/table.rs
//! PURPOSE: In-memory tabular dataset as handed over by a parser.
//! CONTEXT: A header row plus dense rows of `RawValue`. Rows shorter than
//! the header are treated as padded with `Empty`.

use serde::{Deserialize, Serialize};
use crate::value::RawValue;

/// A parsed table: named columns and rows of raw values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Table {
            headers,
            rows: Vec::new(),
        }
    }

    /// Convenience constructor for text-only tables. `None` cells are empty.
    pub fn from_text_rows<H, R>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = Vec<Option<&'static str>>>,
    {
        let mut table = Table::new(headers.into_iter().map(Into::into).collect());
        for row in rows {
            table.push_row(row.into_iter().map(RawValue::from).collect());
        }
        table
    }

    pub fn push_row(&mut self, row: Vec<RawValue>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Index of the first column whose header equals `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Value at (row, col); missing trailing cells read as `Empty`.
    pub fn value(&self, row: usize, col: usize) -> &RawValue {
        static EMPTY: RawValue = RawValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}
