//! FILENAME: core/roster/src/category.rs
//! PURPOSE: The normalized value of a categorical field.

use std::fmt;
use serde::{Deserialize, Serialize};

/// A normalized categorical value, or the explicit "missing" marker.
///
/// Ordering is lexicographic on the text (byte order) with `Missing` sorting
/// after every value, so sorted output never depends on input order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryValue {
    Value(String),
    Missing,
}

impl CategoryValue {
    pub fn value(s: impl Into<String>) -> Self {
        CategoryValue::Value(s.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CategoryValue::Missing)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CategoryValue::Value(s) => Some(s),
            CategoryValue::Missing => None,
        }
    }

    /// Returns the text, or `placeholder` when the value is missing.
    pub fn label_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.as_str().unwrap_or(placeholder)
    }
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::Value(s) => f.write_str(s),
            CategoryValue::Missing => f.write_str("<missing>"),
        }
    }
}
