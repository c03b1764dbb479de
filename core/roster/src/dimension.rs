//! FILENAME: core/roster/src/dimension.rs
//! PURPOSE: Names the categorical dimensions a record can be grouped by.

use std::fmt;
use serde::{Deserialize, Serialize};

/// A categorical dimension of a personnel record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Organizational unit (OPD).
    Organization,
    /// Rank tier (eselon).
    RankTier,
    /// Position / job title (jabatan).
    Position,
    /// Pay grade (golongan).
    PayGrade,
    /// Optional sub-unit level; the index refers to `SchemaConfig::units`.
    Unit(usize),
}

impl Dimension {
    /// The four dimensions every loaded table must provide.
    pub const REQUIRED: [Dimension; 4] = [
        Dimension::Organization,
        Dimension::RankTier,
        Dimension::Position,
        Dimension::PayGrade,
    ];
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Organization => f.write_str("organization"),
            Dimension::RankTier => f.write_str("rank tier"),
            Dimension::Position => f.write_str("position"),
            Dimension::PayGrade => f.write_str("pay grade"),
            Dimension::Unit(i) => write!(f, "unit level {}", i + 1),
        }
    }
}
