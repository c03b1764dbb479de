//! FILENAME: core/roster/src/value.rs
//! PURPOSE: Defines the raw value held by one cell of an uploaded table.
//! CONTEXT: Parsers (CSV/XLSX) produce `RawValue`s; the normalizer turns them
//! into `CategoryValue`s. Nothing downstream of the normalizer looks at these.

use serde::{Deserialize, Serialize};

/// The untyped content of a single table cell, as produced by a parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl RawValue {
    pub fn text(s: impl Into<String>) -> Self {
        RawValue::Text(s.into())
    }

    /// Returns true for values the normalizer treats as absent
    /// (empty cells and NaN numbers).
    pub fn is_absent(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Returns the display value of the cell as a String.
    /// Absent values render as an empty string.
    pub fn display_value(&self) -> String {
        match self {
            RawValue::Empty => String::new(),
            RawValue::Number(n) if n.is_nan() => String::new(),
            RawValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            RawValue::Text(s) => s.clone(),
            RawValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
        }
    }
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Empty
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_render_without_decimals() {
        assert_eq!(RawValue::Number(3.0).display_value(), "3");
        assert_eq!(RawValue::Number(3.5).display_value(), "3.5");
    }

    #[test]
    fn nan_is_absent() {
        assert!(RawValue::Number(f64::NAN).is_absent());
        assert!(RawValue::Empty.is_absent());
        assert!(!RawValue::text("").is_absent());
    }

    #[test]
    fn option_conversion() {
        assert_eq!(RawValue::from(None::<&str>), RawValue::Empty);
        assert_eq!(RawValue::from(Some("II")), RawValue::text("II"));
    }
}
