//! FILENAME: core/roster/src/normalize.rs
//! PURPOSE: Text normalizer for free-text categorical fields.
//! CONTEXT: Applied once per load to every categorical column. The result is
//! either a canonical string (trimmed, internal whitespace collapsed) or
//! `CategoryValue::Missing`.

use crate::category::CategoryValue;
use crate::value::RawValue;

/// Normalizes a raw cell value.
pub fn normalize(value: &RawValue) -> CategoryValue {
    if value.is_absent() {
        return CategoryValue::Missing;
    }
    normalize_text(&value.display_value())
}

/// Normalizes a piece of text: trims, collapses runs of whitespace to one
/// space, and maps the empty result to `Missing`.
pub fn normalize_text(text: &str) -> CategoryValue {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }

    if out.is_empty() {
        CategoryValue::Missing
    } else {
        CategoryValue::Value(out)
    }
}
