//! FILENAME: core/roster/src/lib.rs
//! PURPOSE: Personnel record model shared by the aggregation engine and the app.
//! CONTEXT: Raw table → normalized records. Holds the text normalizer, the
//! rank order resolver and the schema configuration.

pub mod category;
pub mod config;
pub mod dimension;
pub mod error;
pub mod normalize;
pub mod rank;
pub mod record;
pub mod table;
pub mod value;

// Re-export commonly used types at the crate root
pub use category::CategoryValue;
pub use config::{ColumnSpec, SchemaConfig};
pub use dimension::Dimension;
pub use error::SchemaError;
pub use normalize::{normalize, normalize_text};
pub use rank::{RankKey, RankOrder, FALLBACK_RANK_KEY};
pub use record::{Record, RecordSet};
pub use table::Table;
pub use value::RawValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_to_records_workflow() {
        let table = Table::from_text_rows(
            ["satuan_kerja_nama", "eselon", "jabatan_nama", "golongan"],
            vec![
                vec![Some("A"), Some(" NON-eselon "), Some("Staf"), Some("II/a")],
                vec![Some("A"), Some("II"), Some("Kepala Dinas"), Some("IV/c")],
            ],
        );
        let config = SchemaConfig::default();
        let records = RecordSet::from_table(&table, &config).unwrap();

        let keys: Vec<f64> = records.iter().map(|r| r.rank_key.as_f64()).collect();
        assert_eq!(keys, vec![9.0, 2.0]);
        assert_eq!(records.records()[0].rank, normalize_text("NON-eselon"));
    }
}
