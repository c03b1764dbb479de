//! FILENAME: core/pivot-engine/src/error.rs

use thiserror::Error;
use roster::Dimension;

/// Configuration errors detected before any grouping starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("hierarchy path is empty")]
    EmptyPath,

    #[error("dimension '{0}' appears more than once in the hierarchy path")]
    DuplicateLevel(Dimension),

    #[error("column for {dimension} ('{column}') is not present in the loaded data")]
    MissingDimension { dimension: Dimension, column: String },
}
