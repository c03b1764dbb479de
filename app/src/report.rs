//! FILENAME: app/src/report.rs
// PURPOSE: Builds the filter selection from CLI values and renders the
// recomputed report as aligned text tables or JSON.

use std::io::{self, Write};

use serde::Serialize;

use pivot_engine::{
    AggregateSummary, AggregateTable, Audit, CrossTab, FilterSelection, Report, RankSelection,
    ValueCount,
};
use roster::{normalize_text, CategoryValue, Dimension, Record, RecordSet, SchemaConfig};

/// Rows shown in the audit's sample table.
pub const SAMPLE_ROWS: usize = 10;

// ============================================================================
// SELECTION
// ============================================================================

/// Maps a user-supplied category to a normalized value. The dimension's
/// placeholder label selects the missing value.
fn category_arg(value: &str, placeholder: &str) -> CategoryValue {
    if value.trim() == placeholder {
        CategoryValue::Missing
    } else {
        normalize_text(value)
    }
}

/// Builds the active filter. No rank (or the all-sentinel) means every rank
/// tier; empty organization or grade lists mean every observed value.
pub fn parse_selection(
    rank: Option<&str>,
    organizations: &[String],
    grades: &[String],
    records: &RecordSet,
    config: &SchemaConfig,
) -> FilterSelection {
    let mut selection = FilterSelection::everything(records);

    match rank {
        Some(label) if label.trim() != config.all_label => {
            let placeholder = config.placeholder(Dimension::RankTier);
            selection = selection.with_rank(RankSelection::Only(category_arg(label, &placeholder)));
        }
        _ => {}
    }

    if !organizations.is_empty() {
        let placeholder = config.placeholder(Dimension::Organization);
        selection = selection
            .with_organizations(organizations.iter().map(|o| category_arg(o, &placeholder)));
    }
    if !grades.is_empty() {
        let placeholder = config.placeholder(Dimension::PayGrade);
        selection = selection.with_grades(grades.iter().map(|g| category_arg(g, &placeholder)));
    }

    log::debug!("active selection: {:?}", selection);
    selection
}

/// Display label of a rank selection, e.g. `III/IV` or `[SEMUA]`.
pub fn rank_label(rank: &RankSelection, config: &SchemaConfig) -> String {
    match rank {
        RankSelection::All => config.all_label.clone(),
        RankSelection::Only(value) => value
            .label_or(&config.placeholder(Dimension::RankTier))
            .to_string(),
    }
}

// ============================================================================
// OUTPUT MODEL
// ============================================================================

/// Audit view: global distributions plus the first rows of the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditView {
    #[serde(flatten)]
    pub audit: Audit,
    pub sample: Vec<Record>,
}

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutput {
    pub selection: FilterSelection,
    pub report: Report,
    pub audit: Option<AuditView>,
}

// ============================================================================
// TEXT RENDERING
// ============================================================================

/// Writes `grid` with columns padded to a common width. The first row is
/// the header and is underlined.
pub fn write_grid<W: Write>(out: &mut W, grid: &[Vec<String>]) -> io::Result<()> {
    let columns = grid.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for line in grid {
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    for (n, line) in grid.iter().enumerate() {
        let mut text = String::new();
        for (i, cell) in line.iter().enumerate() {
            if i > 0 {
                text.push_str("  ");
            }
            text.push_str(cell);
            let pad = widths[i] - cell.chars().count();
            text.extend(std::iter::repeat(' ').take(pad));
        }
        writeln!(out, "{}", text.trim_end())?;

        if n == 0 {
            let rule: usize = widths.iter().sum::<usize>() + 2 * columns.saturating_sub(1);
            writeln!(out, "{}", "-".repeat(rule))?;
        }
    }
    Ok(())
}

/// Detail-table cells: level labels, count, percentage; largest groups first.
pub fn aggregate_grid(table: &AggregateTable, config: &SchemaConfig) -> Vec<Vec<String>> {
    let mut header = table.level_labels.clone();
    header.push(config.count_label.clone());
    header.push(config.percentage_label.clone());

    let mut grid = vec![header];
    for row in table.by_count_desc().rows {
        let mut line: Vec<String> = row.labels.into_iter().collect();
        line.push(row.count.to_string());
        line.push(format!("{:.2}", row.percentage));
        grid.push(line);
    }
    grid
}

fn distribution_grid(label: &str, counts: &[ValueCount], config: &SchemaConfig) -> Vec<Vec<String>> {
    let mut grid = vec![vec![label.to_string(), config.count_label.clone()]];
    grid.extend(
        counts
            .iter()
            .map(|c| vec![c.label.clone(), c.count.to_string()]),
    );
    grid
}

fn sample_grid(records: &[Record], config: &SchemaConfig) -> Vec<Vec<String>> {
    let mut grid: Vec<Vec<String>> =
        vec![Dimension::REQUIRED.iter().map(|d| config.label(*d)).collect()];
    for record in records {
        grid.push(
            Dimension::REQUIRED
                .iter()
                .map(|d| match record.get(*d) {
                    Some(value) => value.label_or(&config.placeholder(*d)).to_string(),
                    None => String::new(),
                })
                .collect(),
        );
    }
    grid
}

fn write_summary<W: Write>(out: &mut W, summary: &AggregateSummary) -> io::Result<()> {
    let distinct: Vec<String> = summary
        .distinct
        .iter()
        .map(|d| format!("{} {}", d.label, d.distinct))
        .collect();
    writeln!(
        out,
        "total {} | rows {} | mean per row {:.1} | distinct: {}",
        summary.total_count,
        summary.row_count,
        summary.mean_count_per_row,
        distinct.join(", ")
    )
}

fn write_heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))
}

fn write_cross_tab<W: Write>(out: &mut W, tab: &CrossTab) -> io::Result<()> {
    write_grid(out, &tab.to_grid())
}

/// Renders the report (and the audit, when present) as text tables.
pub fn render_text<W: Write>(
    out: &mut W,
    output: &RunOutput,
    config: &SchemaConfig,
) -> io::Result<()> {
    let report = &output.report;
    writeln!(
        out,
        "{}: {} | {} of {} records selected",
        config.rank.label,
        rank_label(&output.selection.rank, config),
        report.filtered_records,
        report.total_records
    )?;

    for view in &report.hierarchies {
        write_heading(out, &view.title)?;
        write_grid(out, &aggregate_grid(&view.table, config))?;
        write_summary(out, &view.summary)?;
    }

    let tab = &report.cross_tab;
    write_heading(
        out,
        &format!("{} x {}", config.label(tab.row_dimension), config.label(tab.column_dimension)),
    )?;
    write_cross_tab(out, tab)?;

    if let Some(view) = &output.audit {
        let audit = &view.audit;
        write_heading(out, &format!("Audit: {}", config.rank.label))?;
        write_grid(out, &distribution_grid(&config.rank.label, &audit.rank_distribution, config))?;

        write_heading(out, &format!("Audit: {}", config.grade.label))?;
        write_grid(out, &distribution_grid(&config.grade.label, &audit.grade_distribution, config))?;

        write_heading(out, &format!("Audit: top {}", config.organization.label))?;
        write_grid(
            out,
            &distribution_grid(&config.organization.label, &audit.top_organizations, config),
        )?;

        write_heading(out, "Audit: sample rows")?;
        write_grid(out, &sample_grid(&view.sample, config))?;

        writeln!(out)?;
        writeln!(out, "{} options: {}", config.rank.label, audit.options.ranks.join(", "))?;
        writeln!(
            out,
            "{} options: {}",
            config.organization.label,
            audit.options.organizations.len()
        )?;
        writeln!(out, "{} options: {}", config.grade.label, audit.options.grades.join(", "))?;
    }

    Ok(())
}

/// Renders the whole run as pretty-printed JSON.
pub fn render_json<W: Write>(out: &mut W, output: &RunOutput) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(&mut *out, output)?;
    writeln!(out).map_err(serde_json::Error::io)
}
