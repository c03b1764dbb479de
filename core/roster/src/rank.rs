//! FILENAME: core/roster/src/rank.rs
//! PURPOSE: Rank order resolver for the rank-tier (eselon) field.
//! CONTEXT: Rank tiers are an open-ended text column whose seniority order is
//! not alphabetical. A lookup table maps known labels to a numeric key;
//! everything else (including missing values) gets the fallback key and
//! sorts last.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::category::CategoryValue;

/// Key assigned to labels absent from the table.
pub const FALLBACK_RANK_KEY: f64 = 99.0;

// ============================================================================
// RANK KEY
// ============================================================================

/// Numeric sort key for a rank tier. Wraps an f64 so it can be used in
/// `Ord` contexts; comparison uses `f64::total_cmp`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankKey(pub f64);

impl RankKey {
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankKey {}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for RankKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for RankKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// RANK ORDER TABLE
// ============================================================================

/// Lookup table from (uppercased) rank label to sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RankOrderConfig", into = "RankOrderConfig")]
pub struct RankOrder {
    table: BTreeMap<String, RankKey>,
    fallback: RankKey,
}

/// Serialized shape of a `RankOrder`: `{"table": {...}, "fallback": 99}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RankOrderConfig {
    table: BTreeMap<String, f64>,
    #[serde(default = "default_fallback")]
    fallback: f64,
}

fn default_fallback() -> f64 {
    FALLBACK_RANK_KEY
}

impl From<RankOrderConfig> for RankOrder {
    fn from(config: RankOrderConfig) -> Self {
        RankOrder::new(config.table, config.fallback)
    }
}

impl From<RankOrder> for RankOrderConfig {
    fn from(order: RankOrder) -> Self {
        RankOrderConfig {
            table: order.table.into_iter().map(|(k, v)| (k, v.0)).collect(),
            fallback: order.fallback.0,
        }
    }
}

impl RankOrder {
    /// Builds a table. Labels are uppercased so lookups are case-insensitive.
    pub fn new<I, S>(entries: I, fallback: f64) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let table = entries
            .into_iter()
            .map(|(label, key)| (label.as_ref().to_uppercase(), RankKey(key)))
            .collect();
        RankOrder {
            table,
            fallback: RankKey(fallback),
        }
    }

    pub fn fallback(&self) -> RankKey {
        self.fallback
    }

    /// Resolves a normalized rank-tier value. Missing maps to the fallback.
    pub fn resolve(&self, value: &CategoryValue) -> RankKey {
        match value {
            CategoryValue::Value(label) => self.resolve_label(label),
            CategoryValue::Missing => self.fallback,
        }
    }

    /// Resolves a label, case-insensitively.
    pub fn resolve_label(&self, label: &str) -> RankKey {
        self.table
            .get(&label.to_uppercase())
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for RankOrder {
    fn default() -> Self {
        RankOrder::new(
            [
                ("I", 1.0),
                ("II", 2.0),
                ("III", 3.0),
                ("III/IV", 3.5),
                ("IV", 4.0),
                ("NON-ESELON", 9.0),
            ],
            FALLBACK_RANK_KEY,
        )
    }
}
