//! FILENAME: core/roster/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("required column(s) not found in data: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}
