//! FILENAME: core/roster/src/record.rs
//! PURPOSE: Normalized personnel records and the record set built from a table.
//! CONTEXT: `RecordSet::from_table` is the single entry point from raw data
//! into the core: it checks the schema, normalizes every categorical field
//! and annotates each record with its rank-order key. Records are immutable
//! afterwards; filtering produces new sets.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use crate::category::CategoryValue;
use crate::config::SchemaConfig;
use crate::dimension::Dimension;
use crate::error::SchemaError;
use crate::normalize::normalize;
use crate::rank::{RankKey, RankOrder};
use crate::table::Table;

// ============================================================================
// RECORD
// ============================================================================

/// One personnel record after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Row index in the source table (0-based, excluding header).
    pub source_row: usize,

    pub organization: CategoryValue,
    pub rank: CategoryValue,
    pub position: CategoryValue,
    pub grade: CategoryValue,

    /// Sub-unit values, indexed like `SchemaConfig::units`. Levels whose
    /// column is absent from the table hold `Missing`.
    pub units: SmallVec<[CategoryValue; 2]>,

    /// Rank-order key derived from `rank`.
    pub rank_key: RankKey,
}

impl Record {
    /// Builds a record from already normalized values.
    pub fn new(
        source_row: usize,
        organization: CategoryValue,
        rank: CategoryValue,
        position: CategoryValue,
        grade: CategoryValue,
        rank_order: &RankOrder,
    ) -> Self {
        let rank_key = rank_order.resolve(&rank);
        Record {
            source_row,
            organization,
            rank,
            position,
            grade,
            units: SmallVec::new(),
            rank_key,
        }
    }

    pub fn with_units(mut self, units: impl IntoIterator<Item = CategoryValue>) -> Self {
        self.units = units.into_iter().collect();
        self
    }

    /// Value of a dimension. `None` for unit levels the record does not carry.
    pub fn get(&self, dimension: Dimension) -> Option<&CategoryValue> {
        match dimension {
            Dimension::Organization => Some(&self.organization),
            Dimension::RankTier => Some(&self.rank),
            Dimension::Position => Some(&self.position),
            Dimension::PayGrade => Some(&self.grade),
            Dimension::Unit(i) => self.units.get(i),
        }
    }
}

// ============================================================================
// RECORD SET
// ============================================================================

/// An ordered collection of records plus the sub-unit levels that were
/// present in the source table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    records: Vec<Record>,
    available_units: Vec<usize>,
}

impl RecordSet {
    pub fn from_records(records: Vec<Record>, available_units: Vec<usize>) -> Self {
        RecordSet {
            records,
            available_units,
        }
    }

    /// Normalizes a parsed table into records.
    ///
    /// Fails if any of the four required columns is absent; every missing
    /// column is listed. Configured sub-unit columns that are absent are
    /// skipped with a warning.
    pub fn from_table(table: &Table, config: &SchemaConfig) -> Result<Self, SchemaError> {
        let mut missing = Vec::new();
        let mut required = [0usize; 4];
        for (slot, dimension) in required.iter_mut().zip(Dimension::REQUIRED) {
            // REQUIRED dimensions always have a column spec
            let source = config
                .column(dimension)
                .map(|spec| spec.source.as_str())
                .unwrap_or_default();
            match table.column_index(source) {
                Some(idx) => *slot = idx,
                None => missing.push(source.to_string()),
            }
        }
        if !missing.is_empty() {
            log::error!("schema check failed: missing columns {:?}", missing);
            return Err(SchemaError::MissingColumns(missing));
        }
        let [org_col, rank_col, position_col, grade_col] = required;

        let mut unit_cols: Vec<Option<usize>> = Vec::with_capacity(config.units.len());
        let mut available_units = Vec::new();
        for (i, spec) in config.units.iter().enumerate() {
            let idx = table.column_index(&spec.source);
            match idx {
                Some(_) => available_units.push(i),
                None => log::warn!("unit column '{}' not found, skipping level {}", spec.source, i + 1),
            }
            unit_cols.push(idx);
        }

        let mut records = Vec::with_capacity(table.row_count());
        for row in 0..table.row_count() {
            let record = Record::new(
                row,
                normalize(table.value(row, org_col)),
                normalize(table.value(row, rank_col)),
                normalize(table.value(row, position_col)),
                normalize(table.value(row, grade_col)),
                &config.rank_order,
            )
            .with_units(unit_cols.iter().map(|col| match col {
                Some(col) => normalize(table.value(row, *col)),
                None => CategoryValue::Missing,
            }));
            records.push(record);
        }

        log::info!(
            "loaded {} records ({} unit levels)",
            records.len(),
            available_units.len()
        );

        let set = RecordSet {
            records,
            available_units,
        };
        for dimension in set.placeholder_collisions(config) {
            log::warn!(
                "column '{}' contains the literal value '{}'; it will be counted with missing values",
                config.column(dimension).map(|spec| spec.source.as_str()).unwrap_or_default(),
                config.placeholder(dimension)
            );
        }
        Ok(set)
    }

    /// Loaded dimensions holding a value equal to their missing-value
    /// placeholder. Such values render exactly like missing ones.
    pub fn placeholder_collisions(&self, config: &SchemaConfig) -> Vec<Dimension> {
        let units = self.available_units.iter().map(|&i| Dimension::Unit(i));
        Dimension::REQUIRED
            .into_iter()
            .chain(units)
            .filter(|&dimension| {
                let placeholder = config.placeholder(dimension);
                self.records.iter().any(|record| {
                    record
                        .get(dimension)
                        .and_then(CategoryValue::as_str)
                        .map_or(false, |value| value == placeholder)
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Indices into `SchemaConfig::units` of the levels loaded from the table.
    pub fn available_units(&self) -> &[usize] {
        &self.available_units
    }

    /// Whether values for `dimension` were loaded.
    pub fn has_dimension(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Unit(i) => self.available_units.contains(&i),
            _ => true,
        }
    }

    /// A new set holding the records that satisfy `predicate`, in order.
    pub fn subset<F>(&self, mut predicate: F) -> RecordSet
    where
        F: FnMut(&Record) -> bool,
    {
        RecordSet {
            records: self.records.iter().filter(|r| predicate(r)).cloned().collect(),
            available_units: self.available_units.clone(),
        }
    }

    /// The first `n` records, for sample views.
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
