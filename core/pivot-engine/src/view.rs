//! FILENAME: core/pivot-engine/src/view.rs
//! Aggregation View - Output tables for the presentation layer.
//!
//! Everything here is a fresh value produced by one computation:
//! - `AggregateTable`: ordered grouped counts with percentages
//! - `AggregateSummary`: headline metrics shown under a detail table
//! - `CrossTab`: row × column count matrix with totals
//! - `ValueCount`: one line of a single-dimension distribution

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use roster::{CategoryValue, Dimension, RankKey};
use crate::definition::HierarchyPath;

/// Percentage of `count` in `total`, rounded to 2 decimals. 0 when the
/// total is 0.
pub fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(100.0 * count as f64 / total as f64)
}

/// Rounds to 2 decimal places, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

// ============================================================================
// AGGREGATE TABLE
// ============================================================================

/// One group of a hierarchical aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    /// Normalized values, one per hierarchy level.
    pub key: SmallVec<[CategoryValue; 4]>,

    /// Display labels: `key` with missing values replaced by the level's
    /// placeholder.
    pub labels: SmallVec<[String; 4]>,

    pub count: usize,

    /// 100 × count / total, 2 decimals.
    pub percentage: f64,

    /// Rank-order key of the group when rank tier is part of the path.
    pub rank_key: Option<RankKey>,
}

/// Result of aggregating a record set along a hierarchy path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTable {
    pub path: HierarchyPath,

    /// Display label of each level (e.g. "OPD", "Eselon").
    pub level_labels: Vec<String>,

    pub rows: Vec<AggregateRow>,

    /// Sum of all row counts (= size of the aggregated record set).
    pub total: usize,
}

impl AggregateTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Copy of the table with rows ordered by count, largest first.
    /// Equal counts keep their hierarchy order.
    pub fn by_count_desc(&self) -> AggregateTable {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        AggregateTable {
            path: self.path.clone(),
            level_labels: self.level_labels.clone(),
            rows,
            total: self.total,
        }
    }

    /// Headline metrics for the table.
    pub fn summary(&self) -> AggregateSummary {
        let distinct = self
            .level_labels
            .iter()
            .enumerate()
            .map(|(level, label)| {
                let mut values: Vec<&str> = self
                    .rows
                    .iter()
                    .filter_map(|row| row.labels.get(level).map(String::as_str))
                    .collect();
                values.sort_unstable();
                values.dedup();
                LevelDistinct {
                    label: label.clone(),
                    distinct: values.len(),
                }
            })
            .collect();

        let mean_count_per_row = if self.rows.is_empty() {
            0.0
        } else {
            self.total as f64 / self.rows.len() as f64
        };

        AggregateSummary {
            total_count: self.total,
            row_count: self.rows.len(),
            distinct,
            mean_count_per_row,
        }
    }
}

/// Number of distinct labels at one hierarchy level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDistinct {
    pub label: String,
    pub distinct: usize,
}

/// Metrics displayed next to a detail table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub total_count: usize,
    pub row_count: usize,
    pub distinct: Vec<LevelDistinct>,
    pub mean_count_per_row: f64,
}

// ============================================================================
// CROSS TABULATION
// ============================================================================

/// Count matrix of one dimension against another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossTab {
    pub row_dimension: Dimension,
    pub column_dimension: Dimension,

    pub row_header: String,
    pub total_label: String,

    pub row_keys: Vec<CategoryValue>,
    pub row_labels: Vec<String>,
    pub column_keys: Vec<CategoryValue>,
    pub column_labels: Vec<String>,

    /// `counts[r][c]`, sized rows × columns.
    pub counts: Vec<Vec<usize>>,
    pub row_totals: Vec<usize>,
    pub column_totals: Vec<usize>,
    pub grand_total: usize,
}

impl CrossTab {
    pub fn count(&self, row: usize, column: usize) -> usize {
        self.counts
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(0)
    }

    /// Count for a (row label, column label) pair; 0 when either is absent.
    pub fn count_by_label(&self, row_label: &str, column_label: &str) -> usize {
        let row = self.row_labels.iter().position(|l| l == row_label);
        let column = self.column_labels.iter().position(|l| l == column_label);
        match (row, column) {
            (Some(r), Some(c)) => self.count(r, c),
            _ => 0,
        }
    }

    /// Renders the matrix as text cells: a header row, one row per row
    /// category with a trailing total column, and a final total row.
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(self.row_labels.len() + 2);

        let mut header = Vec::with_capacity(self.column_labels.len() + 2);
        header.push(self.row_header.clone());
        header.extend(self.column_labels.iter().cloned());
        header.push(self.total_label.clone());
        grid.push(header);

        for (r, label) in self.row_labels.iter().enumerate() {
            let mut line = Vec::with_capacity(self.column_labels.len() + 2);
            line.push(label.clone());
            line.extend(self.counts[r].iter().map(|c| c.to_string()));
            line.push(self.row_totals[r].to_string());
            grid.push(line);
        }

        let mut totals = Vec::with_capacity(self.column_labels.len() + 2);
        totals.push(self.total_label.clone());
        totals.extend(self.column_totals.iter().map(|c| c.to_string()));
        totals.push(self.grand_total.to_string());
        grid.push(totals);

        grid
    }
}

// ============================================================================
// DISTRIBUTIONS
// ============================================================================

/// Count of one category in a single-dimension distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCount {
    pub key: CategoryValue,
    pub label: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(labels: &[&str], count: usize) -> AggregateRow {
        AggregateRow {
            key: labels.iter().map(|l| CategoryValue::value(*l)).collect(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            count,
            percentage: 0.0,
            rank_key: None,
        }
    }

    #[test]
    fn percentage_guards_zero_total() {
        assert_eq!(percentage_of(0, 0), 0.0);
        assert_eq!(percentage_of(1, 3), 33.33);
        assert_eq!(percentage_of(2, 3), 66.67);
        assert_eq!(percentage_of(3, 3), 100.0);
    }

    #[test]
    fn percentage_ties_round_to_even() {
        assert_eq!(percentage_of(1, 800), 0.12);
        assert_eq!(percentage_of(1, 32), 3.12);
        assert_eq!(percentage_of(3, 800), 0.38);
        assert_eq!(round2(2.5), 2.5);
    }

    #[test]
    fn by_count_desc_is_stable() {
        let table = AggregateTable {
            path: HierarchyPath::new([Dimension::Organization]),
            level_labels: vec!["OPD".into()],
            rows: vec![row(&["A"], 1), row(&["B"], 3), row(&["C"], 1)],
            total: 5,
        };
        let sorted = table.by_count_desc();
        let labels: Vec<&str> = sorted.rows.iter().map(|r| r.labels[0].as_str()).collect();
        assert_eq!(labels, vec!["B", "A", "C"]);
    }

    #[test]
    fn summary_counts_distinct_labels() {
        let table = AggregateTable {
            path: HierarchyPath::new([Dimension::Organization, Dimension::PayGrade]),
            level_labels: vec!["OPD".into(), "Golongan".into()],
            rows: vec![row(&["A", "III/a"], 2), row(&["A", "IV/a"], 1), row(&["B", "III/a"], 3)],
            total: 6,
        };
        let summary = table.summary();
        assert_eq!(summary.total_count, 6);
        assert_eq!(summary.row_count, 3);
        assert_eq!(summary.distinct[0].distinct, 2);
        assert_eq!(summary.distinct[1].distinct, 2);
        assert_eq!(summary.mean_count_per_row, 2.0);
    }

    #[test]
    fn empty_summary_has_zero_mean() {
        let table = AggregateTable {
            path: HierarchyPath::new([Dimension::Organization]),
            level_labels: vec!["OPD".into()],
            rows: Vec::new(),
            total: 0,
        };
        assert_eq!(table.summary().mean_count_per_row, 0.0);
    }

    #[test]
    fn grid_has_total_row_and_column() {
        let tab = CrossTab {
            row_dimension: Dimension::Organization,
            column_dimension: Dimension::PayGrade,
            row_header: "OPD".into(),
            total_label: "Total".into(),
            row_keys: vec![CategoryValue::value("A")],
            row_labels: vec!["A".into()],
            column_keys: vec![CategoryValue::value("I"), CategoryValue::value("II")],
            column_labels: vec!["I".into(), "II".into()],
            counts: vec![vec![1, 2]],
            row_totals: vec![3],
            column_totals: vec![1, 2],
            grand_total: 3,
        };
        let grid = tab.to_grid();
        assert_eq!(grid[0], vec!["OPD", "I", "II", "Total"]);
        assert_eq!(grid[1], vec!["A", "1", "2", "3"]);
        assert_eq!(grid[2], vec!["Total", "1", "2", "3"]);
        assert_eq!(tab.count_by_label("A", "II"), 2);
        assert_eq!(tab.count_by_label("B", "II"), 0);
    }
}
