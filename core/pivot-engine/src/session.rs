//! FILENAME: core/pivot-engine/src/session.rs
//! Sessions - One loaded dataset plus one active filter selection.
//!
//! The engine keeps no state between calls: the caller owns the session and
//! asks for a full recomputation whenever the data or the selection changes.

use serde::{Deserialize, Serialize};
use roster::{Dimension, RecordSet, SchemaConfig};
use crate::audit::{top_n, value_counts, FilterOptions};
use crate::crosstab::cross_tab;
use crate::definition::{FilterSelection, HierarchyVariant};
use crate::engine::aggregate;
use crate::error::AggregateError;
use crate::filter::filter;
use crate::view::{AggregateSummary, AggregateTable, CrossTab, ValueCount};

/// Number of organizations listed in the audit's "top" table.
pub const AUDIT_TOP_ORGANIZATIONS: usize = 10;

/// A loaded record set and the filter currently applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub records: RecordSet,
    pub selection: FilterSelection,
}

/// One hierarchy view: the table in hierarchy order plus its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyView {
    pub variant: HierarchyVariant,
    pub title: String,
    pub table: AggregateTable,
    pub summary: AggregateSummary,
}

/// Everything the presentation layer renders after one interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub total_records: usize,
    pub filtered_records: usize,
    pub hierarchies: Vec<HierarchyView>,
    /// Organization × pay grade.
    pub cross_tab: CrossTab,
}

/// Global distributions over the unfiltered data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    pub rank_distribution: Vec<ValueCount>,
    pub grade_distribution: Vec<ValueCount>,
    pub top_organizations: Vec<ValueCount>,
    pub options: FilterOptions,
}

impl Session {
    pub fn new(records: RecordSet, selection: FilterSelection) -> Self {
        Session { records, selection }
    }

    /// A session whose selection keeps every record.
    pub fn with_everything_selected(records: RecordSet) -> Self {
        let selection = FilterSelection::everything(&records);
        Session { records, selection }
    }

    /// Records passing the current selection.
    pub fn filtered(&self) -> RecordSet {
        filter(&self.records, &self.selection)
    }

    /// Runs filter, the three hierarchy aggregations and the cross-tab.
    pub fn recompute(&self, config: &SchemaConfig) -> Result<Report, AggregateError> {
        let filtered = self.filtered();

        let hierarchies = HierarchyVariant::ALL
            .iter()
            .map(|variant| {
                let path = variant.path(&filtered);
                let table = aggregate(&filtered, &path, config)?;
                Ok(HierarchyView {
                    variant: *variant,
                    title: variant.title().to_string(),
                    summary: table.summary(),
                    table,
                })
            })
            .collect::<Result<Vec<_>, AggregateError>>()?;

        let cross_tab = cross_tab(&filtered, Dimension::Organization, Dimension::PayGrade, config)?;

        log::info!(
            "recomputed report: {} of {} records pass the filter",
            filtered.len(),
            self.records.len()
        );

        Ok(Report {
            total_records: self.records.len(),
            filtered_records: filtered.len(),
            hierarchies,
            cross_tab,
        })
    }

    /// Distributions and filter options over the unfiltered data.
    pub fn audit(&self, config: &SchemaConfig) -> Result<Audit, AggregateError> {
        Ok(Audit {
            rank_distribution: value_counts(&self.records, Dimension::RankTier, config)?,
            grade_distribution: value_counts(&self.records, Dimension::PayGrade, config)?,
            top_organizations: top_n(
                &self.records,
                Dimension::Organization,
                AUDIT_TOP_ORGANIZATIONS,
                config,
            )?,
            options: FilterOptions::from_records(&self.records, config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster::{CategoryValue, Table};
    use crate::definition::RankSelection;

    fn session() -> Session {
        let table = Table::from_text_rows(
            ["satuan_kerja_nama", "eselon", "jabatan_nama", "golongan"],
            vec![
                vec![Some("A"), Some("III"), Some("Kasi"), Some("II")],
                vec![Some("A"), Some("III"), Some("Kasi"), Some("II")],
                vec![Some("B"), Some(" II "), Some("Kabid"), Some("I")],
            ],
        );
        let records = RecordSet::from_table(&table, &SchemaConfig::default()).unwrap();
        Session::with_everything_selected(records)
    }

    #[test]
    fn report_has_three_hierarchies() {
        let report = session().recompute(&SchemaConfig::default()).unwrap();
        assert_eq!(report.hierarchies.len(), 3);
        assert_eq!(report.filtered_records, 3);
        for view in &report.hierarchies {
            assert_eq!(view.table.total, 3);
            assert_eq!(view.summary.total_count, 3);
        }
        assert_eq!(report.cross_tab.grand_total, 3);
    }

    #[test]
    fn recompute_is_repeatable() {
        let session = session();
        let config = SchemaConfig::default();
        let first = session.recompute(&config).unwrap();
        let second = session.recompute(&config).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn empty_filter_result_is_not_an_error() {
        let mut session = session();
        session.selection.rank = RankSelection::Only(CategoryValue::value("IV"));
        let report = session.recompute(&SchemaConfig::default()).unwrap();
        assert_eq!(report.filtered_records, 0);
        assert!(report.hierarchies.iter().all(|h| h.table.is_empty()));
        assert_eq!(report.cross_tab.grand_total, 0);
    }

    #[test]
    fn audit_uses_unfiltered_data() {
        let mut session = session();
        session.selection.organizations.clear();
        let audit = session.audit(&SchemaConfig::default()).unwrap();
        assert_eq!(audit.top_organizations[0].label, "A");
        assert_eq!(audit.options.ranks, vec!["[SEMUA]", "II", "III"]);
    }
}
