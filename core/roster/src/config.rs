//! FILENAME: core/roster/src/config.rs
//! PURPOSE: Schema configuration passed explicitly into every core entry point.
//! CONTEXT: Column names, display labels, missing-value placeholders and the
//! rank order table. Defaults match the civil-service export the tool was
//! built for (`satuan_kerja_nama`, `eselon`, `jabatan_nama`, `golongan`).

use serde::{Deserialize, Serialize};
use crate::dimension::Dimension;
use crate::rank::RankOrder;

// ============================================================================
// COLUMN SPEC
// ============================================================================

/// Binds a dimension to a source column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Header of the column in the uploaded table.
    pub source: String,

    /// Human-readable label used in rendered and exported tables.
    pub label: String,

    /// Placeholder shown for missing values. Defaults to
    /// `"<label> <unknown_suffix>"`.
    #[serde(default)]
    pub unknown: Option<String>,
}

impl ColumnSpec {
    pub fn new(source: impl Into<String>, label: impl Into<String>) -> Self {
        ColumnSpec {
            source: source.into(),
            label: label.into(),
            unknown: None,
        }
    }

    pub fn with_unknown(mut self, unknown: impl Into<String>) -> Self {
        self.unknown = Some(unknown.into());
        self
    }
}

// ============================================================================
// SCHEMA CONFIG
// ============================================================================

/// Everything the core needs to know about the input schema and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub organization: ColumnSpec,
    pub rank: ColumnSpec,
    pub position: ColumnSpec,
    pub grade: ColumnSpec,

    /// Optional sub-unit columns (bidang, seksi, ...) inserted between rank
    /// tier and position in the detailed hierarchy. Columns absent from the
    /// uploaded table are skipped.
    pub units: Vec<ColumnSpec>,

    pub rank_order: RankOrder,

    /// Appended to a column label to build its default missing placeholder.
    pub unknown_suffix: String,

    /// Label of the total row/column in cross-tabulations.
    pub total_label: String,

    /// Rank-tier option meaning "no rank filter".
    pub all_label: String,

    pub count_label: String,
    pub percentage_label: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        SchemaConfig {
            organization: ColumnSpec::new("satuan_kerja_nama", "OPD"),
            rank: ColumnSpec::new("eselon", "Eselon"),
            position: ColumnSpec::new("jabatan_nama", "Jabatan"),
            grade: ColumnSpec::new("golongan", "Golongan"),
            units: Vec::new(),
            rank_order: RankOrder::default(),
            unknown_suffix: "Tidak Diketahui".to_string(),
            total_label: "Total".to_string(),
            all_label: "[SEMUA]".to_string(),
            count_label: "Jumlah".to_string(),
            percentage_label: "Persentase (%)".to_string(),
        }
    }
}

impl SchemaConfig {
    /// Adds a sub-unit column with the default `Unit L<n>` label.
    pub fn with_unit(mut self, source: impl Into<String>) -> Self {
        let label = format!("Unit L{}", self.units.len() + 1);
        self.units.push(ColumnSpec::new(source, label));
        self
    }

    /// Column spec for a dimension. `None` only for unknown unit levels.
    pub fn column(&self, dimension: Dimension) -> Option<&ColumnSpec> {
        match dimension {
            Dimension::Organization => Some(&self.organization),
            Dimension::RankTier => Some(&self.rank),
            Dimension::Position => Some(&self.position),
            Dimension::PayGrade => Some(&self.grade),
            Dimension::Unit(i) => self.units.get(i),
        }
    }

    /// Display label for a dimension.
    pub fn label(&self, dimension: Dimension) -> String {
        match self.column(dimension) {
            Some(spec) => spec.label.clone(),
            None => dimension.to_string(),
        }
    }

    /// Placeholder for missing values of a dimension. Distinct per dimension
    /// so missing values at different hierarchy levels never share a label.
    pub fn placeholder(&self, dimension: Dimension) -> String {
        match self.column(dimension) {
            Some(ColumnSpec { unknown: Some(unknown), .. }) => unknown.clone(),
            Some(spec) => format!("{} {}", spec.label, self.unknown_suffix),
            None => format!("{} {}", dimension, self.unknown_suffix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_placeholder_matches_level() {
        let config = SchemaConfig::default().with_unit("bidang").with_unit("seksi");
        assert_eq!(config.placeholder(Dimension::Unit(0)), "Unit L1 Tidak Diketahui");
        assert_eq!(config.placeholder(Dimension::Unit(1)), "Unit L2 Tidak Diketahui");
    }

    #[test]
    fn placeholders_are_distinct_per_dimension() {
        let config = SchemaConfig::default();
        let mut seen: Vec<String> = Dimension::REQUIRED
            .iter()
            .map(|d| config.placeholder(*d))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn explicit_unknown_wins() {
        let mut config = SchemaConfig::default();
        config.grade = ColumnSpec::new("gol", "Gol").with_unknown("-");
        assert_eq!(config.placeholder(Dimension::PayGrade), "-");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: SchemaConfig =
            serde_json::from_str(r#"{"organization": {"source": "opd", "label": "Unit Kerja"}}"#)
                .unwrap();
        assert_eq!(config.organization.source, "opd");
        assert_eq!(config.rank.source, "eselon");
        assert_eq!(config.rank_order.resolve_label("iv").as_f64(), 4.0);
    }
}
