//! FILENAME: app/src/lib.rs
// PURPOSE: Command-line front end: load a roster export, apply the filter
// given on the command line and print (or export) the hierarchy reports.

use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use pivot_engine::Session;
use roster::RecordSet;

pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod report;

pub use error::AppError;
pub use report::{AuditView, RunOutput};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "treemap",
    about = "Hierarchical headcount reports (OPD, eselon, jabatan, golongan) from a personnel roster."
)]
pub struct Cli {
    /// Roster export (.csv or .xlsx).
    pub file: PathBuf,

    /// Rank tier to keep; `[SEMUA]` (the default) keeps every tier.
    #[arg(long)]
    pub eselon: Option<String>,

    /// Organization to keep (repeatable). Defaults to every organization.
    #[arg(long = "opd", value_name = "OPD")]
    pub organizations: Vec<String>,

    /// Pay grade to keep (repeatable). Defaults to every grade.
    #[arg(long = "golongan", value_name = "GOLONGAN")]
    pub grades: Vec<String>,

    /// JSON schema config (column names, labels, rank order, unit columns).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the filtered rows, detail tables and cross-tab as CSV here.
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Include global distributions and sample rows.
    #[arg(long)]
    pub audit: bool,

    /// Also write log lines to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Runs one report: load, filter, recompute, render to `out`, and export
/// when `--export-dir` is given.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<RunOutput, AppError> {
    let config = config::load_config(cli.config.as_deref())?;
    let table = persistence::load_table(&cli.file)?;
    let records = RecordSet::from_table(&table, &config)?;

    let selection = report::parse_selection(
        cli.eselon.as_deref(),
        &cli.organizations,
        &cli.grades,
        &records,
        &config,
    );
    let session = Session::new(records, selection);
    let computed = session.recompute(&config)?;

    let audit = if cli.audit {
        Some(AuditView {
            audit: session.audit(&config)?,
            sample: session.records.head(report::SAMPLE_ROWS).to_vec(),
        })
    } else {
        None
    };

    let output = RunOutput {
        selection: session.selection.clone(),
        report: computed,
        audit,
    };

    match cli.format {
        OutputFormat::Text => report::render_text(out, &output, &config)?,
        OutputFormat::Json => report::render_json(out, &output)?,
    }

    if let Some(dir) = &cli.export_dir {
        let filtered = session.filtered();
        export::export_all(dir, &table, &filtered, &output, &config)?;
    }

    Ok(output)
}
