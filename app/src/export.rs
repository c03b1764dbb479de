//! FILENAME: app/src/export.rs
// PURPOSE: Writes the filtered rows, the hierarchy detail tables and the
// cross-tab of one run as CSV files.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use persistence::{filtered_file_name, write_aggregate_csv, write_crosstab_csv, write_records_csv};
use pivot_engine::HierarchyVariant;
use roster::{RecordSet, SchemaConfig, Table};

use crate::error::AppError;
use crate::report::{rank_label, RunOutput};

/// File name of a hierarchy detail table.
pub fn hierarchy_file_name(variant: HierarchyVariant) -> &'static str {
    match variant {
        HierarchyVariant::OrganizationRank => "hierarki_opd_eselon.csv",
        HierarchyVariant::OrganizationRankPosition => "hierarki_opd_eselon_jabatan.csv",
        HierarchyVariant::OrganizationGrade => "hierarki_opd_golongan.csv",
    }
}

pub const CROSS_TAB_FILE_NAME: &str = "pivot_opd_golongan.csv";

fn create(dir: &Path, name: &str) -> Result<(PathBuf, BufWriter<File>), AppError> {
    let path = dir.join(name);
    let file = File::create(&path)?;
    Ok((path, BufWriter::new(file)))
}

/// Writes every export of `output` into `dir` (created when missing) and
/// returns the written paths. `filtered` must be the records behind
/// `output.report`.
pub fn export_all(
    dir: &Path,
    table: &Table,
    filtered: &RecordSet,
    output: &RunOutput,
    config: &SchemaConfig,
) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let name = filtered_file_name(&rank_label(&output.selection.rank, config));
    let (path, writer) = create(dir, &name)?;
    write_records_csv(writer, table, filtered)?;
    written.push(path);

    for view in &output.report.hierarchies {
        let (path, writer) = create(dir, hierarchy_file_name(view.variant))?;
        write_aggregate_csv(writer, &view.table, config)?;
        written.push(path);
    }

    let (path, writer) = create(dir, CROSS_TAB_FILE_NAME)?;
    write_crosstab_csv(writer, &output.report.cross_tab)?;
    written.push(path);

    log::info!("exported {} file(s) to {:?}", written.len(), dir);
    Ok(written)
}
