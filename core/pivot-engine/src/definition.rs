//! FILENAME: core/pivot-engine/src/definition.rs
//! Aggregation Definition - What the caller asks for.
//!
//! This module contains the types that DESCRIBE a computation:
//! - Hierarchy paths (which dimensions to group by, outermost first)
//! - The three hierarchy variants the treemap views use
//! - Filter selections (rank tier, organizations, pay grades)
//!
//! They are plain values: a session holds one selection and passes it on
//! every recomputation.

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use roster::{CategoryValue, Dimension, RecordSet};

// ============================================================================
// HIERARCHY PATH
// ============================================================================

/// Ordered list of grouping dimensions, outermost level first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HierarchyPath(Vec<Dimension>);

impl HierarchyPath {
    pub fn new(levels: impl IntoIterator<Item = Dimension>) -> Self {
        HierarchyPath(levels.into_iter().collect())
    }

    pub fn levels(&self) -> &[Dimension] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of `dimension` in the path, if it participates.
    pub fn position(&self, dimension: Dimension) -> Option<usize> {
        self.0.iter().position(|d| *d == dimension)
    }
}

impl From<Vec<Dimension>> for HierarchyPath {
    fn from(levels: Vec<Dimension>) -> Self {
        HierarchyPath(levels)
    }
}

// ============================================================================
// HIERARCHY VARIANTS
// ============================================================================

/// The hierarchy views rendered by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyVariant {
    /// OPD → Eselon
    OrganizationRank,
    /// OPD → Eselon → (Unit …) → Jabatan
    OrganizationRankPosition,
    /// OPD → Golongan
    OrganizationGrade,
}

impl HierarchyVariant {
    pub const ALL: [HierarchyVariant; 3] = [
        HierarchyVariant::OrganizationRank,
        HierarchyVariant::OrganizationRankPosition,
        HierarchyVariant::OrganizationGrade,
    ];

    /// The grouping path for this variant. The detailed variant includes
    /// every sub-unit level that was loaded into `records`.
    pub fn path(&self, records: &RecordSet) -> HierarchyPath {
        match self {
            HierarchyVariant::OrganizationRank => {
                HierarchyPath::new([Dimension::Organization, Dimension::RankTier])
            }
            HierarchyVariant::OrganizationRankPosition => {
                let mut levels = vec![Dimension::Organization, Dimension::RankTier];
                levels.extend(records.available_units().iter().map(|&i| Dimension::Unit(i)));
                levels.push(Dimension::Position);
                HierarchyPath(levels)
            }
            HierarchyVariant::OrganizationGrade => {
                HierarchyPath::new([Dimension::Organization, Dimension::PayGrade])
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            HierarchyVariant::OrganizationRank => "OPD → Eselon",
            HierarchyVariant::OrganizationRankPosition => "OPD → Eselon → Jabatan",
            HierarchyVariant::OrganizationGrade => "OPD → Golongan",
        }
    }
}

// ============================================================================
// FILTER SELECTION
// ============================================================================

/// Rank-tier constraint: one value, or no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankSelection {
    All,
    Only(CategoryValue),
}

impl Default for RankSelection {
    fn default() -> Self {
        RankSelection::All
    }
}

/// The active filter of a session.
///
/// Organization and grade sets list the allowed values. An empty set lets
/// no record through; use [`FilterSelection::everything`] for "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub rank: RankSelection,
    pub organizations: BTreeSet<CategoryValue>,
    pub grades: BTreeSet<CategoryValue>,
}

impl FilterSelection {
    /// Selection that keeps every record of `records`: all rank tiers and
    /// every observed organization and grade (missing included).
    pub fn everything(records: &RecordSet) -> Self {
        FilterSelection {
            rank: RankSelection::All,
            organizations: records.iter().map(|r| r.organization.clone()).collect(),
            grades: records.iter().map(|r| r.grade.clone()).collect(),
        }
    }

    pub fn with_rank(mut self, rank: RankSelection) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_organizations(mut self, organizations: impl IntoIterator<Item = CategoryValue>) -> Self {
        self.organizations = organizations.into_iter().collect();
        self
    }

    pub fn with_grades(mut self, grades: impl IntoIterator<Item = CategoryValue>) -> Self {
        self.grades = grades.into_iter().collect();
        self
    }
}
