//! FILENAME: core/pivot-engine/src/lib.rs
//! Aggregation subsystem for the personnel treemaps.
//!
//! This crate turns a normalized `roster::RecordSet` into the tables the
//! presentation layer renders. It depends on `roster` only for the record
//! model and the schema configuration.
//!
//! Layers:
//! - `definition`: What to compute (hierarchy paths, filter selections)
//! - `filter`: Filter engine
//! - `engine`: Hierarchical aggregator
//! - `crosstab`: Cross-tabulation builder
//! - `audit`: Distributions and filter options
//! - `view`: Output tables (WHAT we display)
//! - `session`: One dataset + one selection, recomputed on demand

pub mod audit;
pub mod crosstab;
pub mod definition;
pub mod engine;
pub mod error;
pub mod filter;
pub mod session;
pub mod view;

pub use audit::{top_n, value_counts, FilterOptions};
pub use crosstab::cross_tab;
pub use definition::*;
pub use engine::{aggregate, Aggregator};
pub use error::AggregateError;
pub use filter::{filter, matches};
pub use session::{Audit, HierarchyView, Report, Session, AUDIT_TOP_ORGANIZATIONS};
pub use view::*;
