//! FILENAME: core/pivot-engine/src/engine.rs
//! Hierarchical Aggregator - Groups records along a hierarchy path.
//!
//! Takes a RecordSet (already filtered) and a HierarchyPath and produces an
//! AggregateTable ready for treemap rendering.
//!
//! Algorithm:
//! 1. Validate the path against the record set (fail before any grouping)
//! 2. Group records by the full key tuple and count
//! 3. Order groups: rank key (when rank tier is in the path), then first
//!    level, then the full key tuple
//! 4. Attach display labels and percentages

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use roster::{CategoryValue, Dimension, RankKey, RecordSet, SchemaConfig};
use crate::definition::HierarchyPath;
use crate::error::AggregateError;
use crate::view::{percentage_of, AggregateRow, AggregateTable};

/// Borrowed grouping key: one value per level.
type BorrowedKey<'r> = SmallVec<[&'r CategoryValue; 4]>;

static MISSING: CategoryValue = CategoryValue::Missing;

/// Accumulated state of one group.
#[derive(Debug, Clone, Copy)]
struct GroupState {
    count: usize,
    rank_key: Option<RankKey>,
}

/// Fails if `dimension` was not loaded into `records`.
pub(crate) fn check_dimension(
    records: &RecordSet,
    dimension: Dimension,
    config: &SchemaConfig,
) -> Result<(), AggregateError> {
    if records.has_dimension(dimension) {
        return Ok(());
    }
    Err(AggregateError::MissingDimension {
        dimension,
        column: config
            .column(dimension)
            .map(|spec| spec.source.clone())
            .unwrap_or_else(|| dimension.to_string()),
    })
}

// ============================================================================
// AGGREGATOR
// ============================================================================

/// Calculation state for one aggregation pass.
pub struct Aggregator<'a> {
    records: &'a RecordSet,
    path: &'a HierarchyPath,
    config: &'a SchemaConfig,

    /// Level of the rank-tier dimension in the path, if present.
    rank_level: Option<usize>,
}

impl<'a> Aggregator<'a> {
    /// Creates an aggregator after validating the path. No records are
    /// touched if validation fails.
    pub fn new(
        records: &'a RecordSet,
        path: &'a HierarchyPath,
        config: &'a SchemaConfig,
    ) -> Result<Self, AggregateError> {
        if path.is_empty() {
            return Err(AggregateError::EmptyPath);
        }
        for (i, dimension) in path.levels().iter().enumerate() {
            if path.levels()[..i].contains(dimension) {
                return Err(AggregateError::DuplicateLevel(*dimension));
            }
            check_dimension(records, *dimension, config)?;
        }

        Ok(Aggregator {
            records,
            path,
            config,
            rank_level: path.position(Dimension::RankTier),
        })
    }

    /// Runs the aggregation.
    pub fn calculate(&self) -> AggregateTable {
        let groups = self.group();
        let mut rows = self.build_rows(groups);
        self.order(&mut rows);

        let total: usize = rows.iter().map(|r| r.count).sum();
        for row in &mut rows {
            row.percentage = percentage_of(row.count, total);
        }

        log::debug!(
            "aggregate path={:?} records={} groups={}",
            self.path.levels(),
            self.records.len(),
            rows.len()
        );

        AggregateTable {
            path: self.path.clone(),
            level_labels: self.path.levels().iter().map(|d| self.config.label(*d)).collect(),
            rows,
            total,
        }
    }

    /// Step 1: count records per full key tuple.
    fn group(&self) -> FxHashMap<BorrowedKey<'a>, GroupState> {
        let mut groups: FxHashMap<BorrowedKey<'a>, GroupState> = FxHashMap::default();
        let rank_level = self.rank_level;

        for record in self.records.iter() {
            let key: BorrowedKey<'a> = self
                .path
                .levels()
                .iter()
                .map(|d| record.get(*d).unwrap_or(&MISSING))
                .collect();

            let state = groups.entry(key).or_insert(GroupState {
                count: 0,
                rank_key: rank_level.map(|_| record.rank_key),
            });
            state.count += 1;
        }

        groups
    }

    /// Step 2: materialize owned rows with display labels.
    fn build_rows(&self, groups: FxHashMap<BorrowedKey<'a>, GroupState>) -> Vec<AggregateRow> {
        let placeholders: Vec<String> = self
            .path
            .levels()
            .iter()
            .map(|d| self.config.placeholder(*d))
            .collect();

        groups
            .into_iter()
            .map(|(key, state)| {
                let labels = key
                    .iter()
                    .zip(&placeholders)
                    .map(|(value, placeholder)| value.label_or(placeholder).to_string())
                    .collect();
                AggregateRow {
                    key: key.into_iter().cloned().collect(),
                    labels,
                    count: state.count,
                    percentage: 0.0,
                    rank_key: state.rank_key,
                }
            })
            .collect()
    }

    /// Step 3: deterministic display order.
    fn order(&self, rows: &mut [AggregateRow]) {
        rows.sort_by(|a, b| {
            a.rank_key
                .cmp(&b.rank_key)
                .then_with(|| a.key[0].cmp(&b.key[0]))
                .then_with(|| a.key.cmp(&b.key))
        });
    }
}

/// Aggregates `records` along `path`.
///
/// The sum of the returned counts always equals `records.len()`.
pub fn aggregate(
    records: &RecordSet,
    path: &HierarchyPath,
    config: &SchemaConfig,
) -> Result<AggregateTable, AggregateError> {
    let aggregator = Aggregator::new(records, path, config)?;
    Ok(aggregator.calculate())
}
