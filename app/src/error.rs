//! FILENAME: app/src/error.rs

use persistence::PersistenceError;
use pivot_engine::AggregateError;
use roster::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("invalid config file {path}: {source}")]
    Config {
        path: String,
        source: serde_json::Error,
    },

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}
