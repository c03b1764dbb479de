//! FILENAME: tests/test_filter.rs
//! Integration tests for the filter options of the CLI.

mod common;

use common::{assert_consistent, hierarchy, TestHarness};
use pivot_engine::{filter, FilterSelection, HierarchyVariant, RankSelection, Session};
use roster::{normalize_text, CategoryValue, SchemaConfig};

// ============================================================================
// RANK TIER
// ============================================================================

#[test]
fn test_all_sentinel_keeps_everything() {
    let harness = TestHarness::new();
    let (output, _) = harness.run(&["--eselon", "[SEMUA]"]);

    assert_eq!(output.selection.rank, RankSelection::All);
    assert_eq!(output.report.filtered_records, 12);
}

#[test]
fn test_rank_filter_is_exact_after_normalization() {
    let harness = TestHarness::new();
    let (output, _) = harness.run(&["--eselon", "  III "]);

    // "iii" is a different value and is not selected.
    assert_eq!(output.report.filtered_records, 2);
    let table = hierarchy(&output, HierarchyVariant::OrganizationRank);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].labels.to_vec(), vec!["Dinas Kesehatan", "III"]);
    assert_eq!(table.rows[0].percentage, 100.0);
}

#[test]
fn test_missing_rank_can_be_selected_by_placeholder() {
    let harness = TestHarness::new();
    let (output, _) = harness.run(&["--eselon", "Eselon Tidak Diketahui"]);

    assert_eq!(output.selection.rank, RankSelection::Only(CategoryValue::Missing));
    assert_eq!(output.report.filtered_records, 1);
}

// ============================================================================
// ORGANIZATION AND GRADE
// ============================================================================

#[test]
fn test_organization_filter_matches_normalized_names() {
    let harness = TestHarness::new();
    let (output, _) = harness.run(&["--opd", "Dinas Pendidikan"]);

    // Includes the row written as " Dinas  Pendidikan".
    assert_eq!(output.report.filtered_records, 4);
    for view in &output.report.hierarchies {
        assert_consistent(&view.table, 4);
    }
}

#[test]
fn test_missing_organization_by_placeholder() {
    let harness = TestHarness::new();
    let (output, _) = harness.run(&["--opd", "OPD Tidak Diketahui", "--opd", "Badan Keuangan"]);
    assert_eq!(output.report.filtered_records, 2);
}

#[test]
fn test_grade_filter_is_a_set() {
    let harness = TestHarness::new();
    let (output, _) = harness.run(&["--golongan", "IV/a", "--golongan", "IV/c"]);
    assert_eq!(output.report.filtered_records, 5);
}

#[test]
fn test_filters_combine() {
    let harness = TestHarness::new();
    let (output, _) = harness.run(&[
        "--eselon",
        "II",
        "--golongan",
        "IV/c",
        "--opd",
        "Dinas Kesehatan",
    ]);
    assert_eq!(output.report.filtered_records, 1);
}

// ============================================================================
// EMPTY RESULTS
// ============================================================================

#[test]
fn test_unmatched_organization_gives_empty_report() {
    let harness = TestHarness::new();
    let (output, text) = harness.run(&["--opd", "Dinas Perhubungan"]);

    assert_eq!(output.report.total_records, 12);
    assert_eq!(output.report.filtered_records, 0);
    for view in &output.report.hierarchies {
        assert!(view.table.rows.is_empty());
        assert_eq!(view.summary.mean_count_per_row, 0.0);
        assert_consistent(&view.table, 0);
    }
    assert_eq!(output.report.cross_tab.grand_total, 0);
    assert!(text.contains("0 of 12 records selected"));
}

#[test]
fn test_empty_organization_set_passes_nothing() {
    let harness = TestHarness::new();
    let records = harness.records();

    let selection = FilterSelection::everything(&records).with_organizations(Vec::new());
    assert!(filter(&records, &selection).is_empty());

    let report = Session::new(records, selection)
        .recompute(&SchemaConfig::default())
        .unwrap();
    assert_eq!(report.filtered_records, 0);
    assert!(report.hierarchies.iter().all(|h| h.table.rows.is_empty()));
}

#[test]
fn test_filter_keeps_source_order() {
    let harness = TestHarness::new();
    let records = harness.records();
    let selection = FilterSelection::everything(&records)
        .with_rank(RankSelection::Only(normalize_text("NON-ESELON")));

    let rows: Vec<usize> = filter(&records, &selection)
        .iter()
        .map(|r| r.source_row)
        .collect();
    assert_eq!(rows, vec![4, 11]);
}
