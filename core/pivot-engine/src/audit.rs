//! FILENAME: core/pivot-engine/src/audit.rs
//! Data audit helpers: single-dimension distributions and filter options.

use std::collections::BTreeSet;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use roster::{CategoryValue, Dimension, RecordSet, SchemaConfig};
use crate::engine::check_dimension;
use crate::error::AggregateError;
use crate::view::ValueCount;

/// Counts records per category of `dimension`, largest first. Ties are
/// broken by category (missing last), so the result is deterministic.
pub fn value_counts(
    records: &RecordSet,
    dimension: Dimension,
    config: &SchemaConfig,
) -> Result<Vec<ValueCount>, AggregateError> {
    check_dimension(records, dimension, config)?;

    let mut counts: FxHashMap<&CategoryValue, usize> = FxHashMap::default();
    for record in records.iter() {
        if let Some(value) = record.get(dimension) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    let placeholder = config.placeholder(dimension);
    let mut out: Vec<ValueCount> = counts
        .into_iter()
        .map(|(key, count)| ValueCount {
            key: key.clone(),
            label: key.label_or(&placeholder).to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    Ok(out)
}

/// The `n` largest categories of `dimension`.
pub fn top_n(
    records: &RecordSet,
    dimension: Dimension,
    n: usize,
    config: &SchemaConfig,
) -> Result<Vec<ValueCount>, AggregateError> {
    let mut counts = value_counts(records, dimension, config)?;
    counts.truncate(n);
    Ok(counts)
}

// ============================================================================
// FILTER OPTIONS
// ============================================================================

/// Choices offered to the user for each filter, built from the full
/// (unfiltered) record set. Missing values are not offered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Rank tiers, prefixed by the "all" sentinel label.
    pub ranks: Vec<String>,
    pub organizations: Vec<String>,
    pub grades: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &RecordSet, config: &SchemaConfig) -> Self {
        fn observed<'r>(values: impl Iterator<Item = &'r CategoryValue>) -> Vec<String> {
            values
                .filter_map(CategoryValue::as_str)
                .collect::<BTreeSet<&str>>()
                .into_iter()
                .map(str::to_string)
                .collect()
        }

        let mut ranks = vec![config.all_label.clone()];
        ranks.extend(observed(records.iter().map(|r| &r.rank)));

        FilterOptions {
            ranks,
            organizations: observed(records.iter().map(|r| &r.organization)),
            grades: observed(records.iter().map(|r| &r.grade)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster::Table;

    fn sample() -> RecordSet {
        let table = Table::from_text_rows(
            ["satuan_kerja_nama", "eselon", "jabatan_nama", "golongan"],
            vec![
                vec![Some("Dinas B"), Some("IV"), Some("Kasi"), Some("III/d")],
                vec![Some("Dinas A"), Some("II"), Some("Kadis"), Some("IV/c")],
                vec![Some("Dinas A"), Some("III"), Some("Kabid"), Some("III/d")],
                vec![Some("Dinas A"), None, Some("Staf"), None],
                vec![Some("Dinas C"), None, Some("Staf"), Some("II/a")],
            ],
        );
        RecordSet::from_table(&table, &SchemaConfig::default()).unwrap()
    }

    #[test]
    fn value_counts_sorted_by_count_then_key() {
        let records = sample();
        let counts = value_counts(&records, Dimension::RankTier, &SchemaConfig::default()).unwrap();
        let pairs: Vec<(&str, usize)> = counts.iter().map(|c| (c.label.as_str(), c.count)).collect();
        assert_eq!(
            pairs,
            vec![("Eselon Tidak Diketahui", 2), ("II", 1), ("III", 1), ("IV", 1)]
        );
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), records.len());
    }

    #[test]
    fn top_n_truncates() {
        let records = sample();
        let top = top_n(&records, Dimension::Organization, 1, &SchemaConfig::default()).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].label, "Dinas A");
        assert_eq!(top[0].count, 3);
    }

    #[test]
    fn options_are_sorted_and_skip_missing() {
        let options = FilterOptions::from_records(&sample(), &SchemaConfig::default());
        assert_eq!(options.ranks, vec!["[SEMUA]", "II", "III", "IV"]);
        assert_eq!(options.organizations, vec!["Dinas A", "Dinas B", "Dinas C"]);
        assert_eq!(options.grades, vec!["II/a", "III/d", "IV/c"]);
    }
}
