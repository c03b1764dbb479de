//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for the treemap CLI integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use app_lib::{run, AppError, Cli, RunOutput};
use clap::Parser;
use pivot_engine::{AggregateTable, HierarchyVariant};
use roster::{RecordSet, SchemaConfig};
use tempfile::TempDir;

/// Test harness: a temp directory holding a roster CSV.
pub struct TestHarness {
    pub dir: TempDir,
    pub roster: PathBuf,
}

impl TestHarness {
    /// Harness with the standard personnel fixture.
    pub fn new() -> Self {
        Self::with_rows(&PersonnelFixture::headers(), &PersonnelFixture::data())
    }

    /// Harness with the fixture rows in reverse order.
    pub fn reversed() -> Self {
        let mut rows = PersonnelFixture::data();
        rows.reverse();
        Self::with_rows(&PersonnelFixture::headers(), &rows)
    }

    /// Harness with arbitrary rows. Empty strings become empty cells.
    pub fn with_rows<R: AsRef<[&'static str]>>(headers: &[&str], rows: &[R]) -> Self {
        let dir = TempDir::new().unwrap();
        let mut text = headers.join(",");
        text.push('\n');
        for row in rows {
            text.push_str(&row.as_ref().join(","));
            text.push('\n');
        }
        let roster = dir.path().join("roster.csv");
        fs::write(&roster, text).unwrap();
        TestHarness { dir, roster }
    }

    /// Writes an extra file into the harness directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Parses a command line; the roster path is inserted as the first argument.
    pub fn cli(&self, args: &[&str]) -> Cli {
        let mut argv = vec!["treemap", self.roster.to_str().unwrap()];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    /// Runs the CLI and returns the output model plus what was printed.
    pub fn run(&self, args: &[&str]) -> (RunOutput, String) {
        let mut buf = Vec::new();
        let output = run(&self.cli(args), &mut buf).unwrap();
        (output, String::from_utf8(buf).unwrap())
    }

    pub fn run_err(&self, args: &[&str]) -> AppError {
        let mut buf = Vec::new();
        run(&self.cli(args), &mut buf).unwrap_err()
    }

    /// The roster loaded directly, with the default config.
    pub fn records(&self) -> RecordSet {
        let table = persistence::load_table(&self.roster).unwrap();
        RecordSet::from_table(&table, &SchemaConfig::default()).unwrap()
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

/// A small district roster. Exercises whitespace noise, a lowercase rank
/// label, an unknown rank label, and missing rank, organization and unit.
pub struct PersonnelFixture;

impl PersonnelFixture {
    pub fn headers() -> Vec<&'static str> {
        vec!["satuan_kerja_nama", "eselon", "jabatan_nama", "golongan", "bidang", "nip"]
    }

    pub fn data() -> Vec<[&'static str; 6]> {
        vec![
            ["Dinas Kesehatan", "II", "Kepala Dinas", "IV/c", "Sekretariat", "001"],
            ["Dinas Kesehatan", "III", "Kepala Bidang", "IV/a", "Pelayanan", "002"],
            ["Dinas Kesehatan", "III", "Kepala Bidang", "IV/a", "Pencegahan", "003"],
            ["Dinas Kesehatan", "IV", "Kepala Seksi", "III/d", "Pelayanan", "004"],
            ["Dinas Kesehatan", "NON-ESELON", "Staf", "III/a", "Pelayanan", "005"],
            ["Dinas Kesehatan", "", "Staf", "II/c", "", "006"],
            [" Dinas  Pendidikan", "II", "Kepala Dinas", "IV/c", "Sekretariat", "007"],
            ["Dinas Pendidikan", "III/IV", "Kepala Seksi", "III/d", "Kurikulum", "008"],
            ["Dinas Pendidikan", "iii", "Kepala Bidang", "IV/a", "Kurikulum", "009"],
            ["Dinas Pendidikan", "V", "Staf", "III/b", "Kurikulum", "010"],
            ["", "IV", "Kepala Seksi", "III/c", "Umum", "011"],
            ["Badan Keuangan", "NON-ESELON", "Staf", "III/a", "Anggaran", "012"],
        ]
    }

    pub const ROWS: usize = 12;

    /// Config that adds `bidang` as the first sub-unit level.
    pub fn unit_config_json() -> &'static str {
        r#"{"units": [{"source": "bidang", "label": "Bidang"}]}"#
    }
}

// ============================================================================
// ASSERTION HELPERS
// ============================================================================

/// The table of one hierarchy variant.
pub fn hierarchy(output: &RunOutput, variant: HierarchyVariant) -> &AggregateTable {
    &output
        .report
        .hierarchies
        .iter()
        .find(|h| h.variant == variant)
        .unwrap()
        .table
}

/// Rows of a table as label vectors plus count.
pub fn labelled_rows(table: &AggregateTable) -> Vec<(Vec<String>, usize)> {
    table
        .rows
        .iter()
        .map(|r| (r.labels.to_vec(), r.count))
        .collect()
}

/// Assert that counts sum to `expected` and percentages sum to ~100.
pub fn assert_consistent(table: &AggregateTable, expected: usize) {
    let sum: usize = table.rows.iter().map(|r| r.count).sum();
    assert_eq!(sum, expected);
    assert_eq!(table.total, expected);

    let pct: f64 = table.rows.iter().map(|r| r.percentage).sum();
    if expected == 0 {
        assert_eq!(pct, 0.0);
    } else {
        let tolerance = 0.01 * table.rows.len() as f64;
        assert!((pct - 100.0).abs() <= tolerance, "percentages sum to {}", pct);
    }
}
