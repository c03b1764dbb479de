//! FILENAME: app/src/config.rs
// PURPOSE: Loads the schema configuration (column names, labels, rank order).

use std::fs;
use std::path::Path;

use roster::SchemaConfig;

use crate::error::AppError;

/// Parses a JSON schema config. Absent fields keep their defaults, so
/// `{"units": [{"source": "bidang", "label": "Bidang"}]}` is a complete file.
pub fn parse_config(text: &str) -> Result<SchemaConfig, serde_json::Error> {
    serde_json::from_str(text)
}

/// Loads the config from `path`, or the built-in defaults when no path is
/// given.
pub fn load_config(path: Option<&Path>) -> Result<SchemaConfig, AppError> {
    let Some(path) = path else {
        return Ok(SchemaConfig::default());
    };

    let text = fs::read_to_string(path)?;
    let config = parse_config(&text).map_err(|source| AppError::Config {
        path: path.display().to_string(),
        source,
    })?;

    log::info!(
        "loaded config {:?}: {} unit column(s), {} rank labels",
        path,
        config.units.len(),
        config.rank_order.len()
    );
    Ok(config)
}
