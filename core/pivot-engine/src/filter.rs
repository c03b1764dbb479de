//! FILENAME: core/pivot-engine/src/filter.rs
//! Filter Engine - Narrows a record set by the session's selection.

use roster::{Record, RecordSet};
use crate::definition::{FilterSelection, RankSelection};

/// Whether one record passes every active constraint.
pub fn matches(record: &Record, selection: &FilterSelection) -> bool {
    let rank_ok = match &selection.rank {
        RankSelection::All => true,
        RankSelection::Only(rank) => record.rank == *rank,
    };

    rank_ok
        && selection.organizations.contains(&record.organization)
        && selection.grades.contains(&record.grade)
}

/// Returns the records matching `selection` (logical AND of all
/// constraints), in their original order. The input is left untouched.
pub fn filter(records: &RecordSet, selection: &FilterSelection) -> RecordSet {
    let filtered = records.subset(|record| matches(record, selection));
    log::debug!(
        "filter rank={:?} orgs={} grades={}: {} -> {} records",
        selection.rank,
        selection.organizations.len(),
        selection.grades.len(),
        records.len(),
        filtered.len()
    );
    filtered
}
