//! Plain-text renderers and export for summaries, briefs, and status reports.
//!
//! These functions are the presentation boundary: they only read [`Summary`], [`Table`], and the
//! metric registry, and return strings (or write CSV).

use std::io::Write;

use serde::Serialize;

use crate::error::DeckResult;
use crate::metrics::MetricRegistry;
use crate::types::{Summary, Table};

/// Columns with more distinct values than this share of rows are flagged as identifier-like.
pub const HIGH_CARDINALITY_RATIO: f64 = 0.8;

const DEFAULT_GOAL: &str = "Clarify goal";
const DEFAULT_GUARDRAILS: &str = "Apply toxicity, latency, and bias guardrails";
const DEFAULT_METRIC: &str = "Primary metric TBD";
const ROLLOUT_PLAN: &str = "Launch 10-15% holdout on search traffic, validate offline eval parity \
    (NDCG, precision@k), then ramp online with weekly LLM-based QA on MDFs and query clusters.";

/// Descriptive insight lines for a summary.
///
/// One line per numeric column with finite stats, then one line listing high-cardinality columns
/// (if any).
pub fn insights(summary: &Summary) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .numeric_columns
        .iter()
        .filter_map(|col| {
            let stats = summary.profile(col)?.stats?;
            let finite = [stats.mean, stats.min, stats.max, stats.std]
                .iter()
                .all(|v| v.is_finite());
            finite.then(|| {
                format!(
                    "{col}: mean {:.2}, range {:.2}–{:.2}, std {:.2}",
                    stats.mean, stats.min, stats.max, stats.std
                )
            })
        })
        .collect();

    let high_card = summary.high_cardinality_columns(HIGH_CARDINALITY_RATIO);
    if !high_card.is_empty() {
        lines.push(format!("High-cardinality fields: {}", high_card.join(", ")));
    }
    lines
}

/// Bulleted insight text, or a hint when there is nothing to say.
pub fn render_insights(summary: &Summary) -> String {
    let lines = insights(summary);
    if lines.is_empty() {
        return "No numeric columns detected yet.".to_string();
    }
    lines
        .iter()
        .map(|l| format!("- {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Header plus the first `limit` rows, tab-separated. Absent values render as empty cells.
pub fn preview(table: &Table, limit: usize) -> String {
    if table.rows.is_empty() {
        return String::new();
    }
    let mut out = table.columns.join("\t");
    for row in table.rows.iter().take(limit) {
        out.push('\n');
        let cells: Vec<&str> = table
            .columns
            .iter()
            .map(|c| row.get(c).unwrap_or(""))
            .collect();
        out.push_str(&cells.join("\t"));
    }
    out
}

/// Dataset headline counts, one per line.
pub fn render_counts(summary: &Summary) -> String {
    format!(
        "Rows: {}\nColumns: {}\nMissing values: {}\nNumeric columns: {}",
        summary.row_count,
        summary.column_count,
        summary.missing_count,
        summary.numeric_columns.len()
    )
}

/// Experiment design brief. Blank inputs use defaults.
pub fn design_brief(goal: Option<&str>, primary_metric: Option<&str>, guardrails: Option<&str>) -> String {
    format!(
        "Goal: {}\nPrimary metric: {}.\nLLM guardrails: {}.\nPlan: {ROLLOUT_PLAN}",
        non_blank(goal).unwrap_or(DEFAULT_GOAL),
        non_blank(primary_metric).unwrap_or(DEFAULT_METRIC),
        non_blank(guardrails).unwrap_or(DEFAULT_GUARDRAILS),
    )
}

/// Weekly status report for the headline metric.
///
/// `summary` is `None` when no dataset is loaded.
pub fn status_report(summary: Option<&Summary>, metrics: &MetricRegistry) -> String {
    let headline = metrics.headline().map_or("Metric TBD", |m| m.name.as_str());

    let detail = match summary.and_then(Summary::first_numeric) {
        None => "Awaiting dataset to describe performance".to_string(),
        Some((col, None)) => format!("Top numeric field {col} ready for monitoring"),
        Some((col, Some(stats))) => format!("Top numeric field {col} mean {:.2}", stats.mean),
    };

    let names = metrics.names();
    let compare = match names.as_slice() {
        [] => "key metrics".to_string(),
        [only] => only.to_string(),
        [first, second, ..] => format!("{first} and {second}"),
    };

    format!(
        "Report: {headline} update. {detail}. Next: compare {compare} vs. last week, run MDF readout, \
         enforce guardrails, and prepare go/no-go packet."
    )
}

#[derive(Debug, Serialize)]
struct ProfileRecord<'a> {
    column: &'a str,
    is_numeric: bool,
    unique_count: usize,
    missing_count: usize,
    sample: String,
    mean: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
    std: Option<f64>,
}

/// Write one CSV record per column profile (with a header row).
///
/// Sample values are joined with `"; "`; missing stats are empty cells.
pub fn write_profiles_csv<W: Write>(summary: &Summary, writer: W) -> DeckResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for p in &summary.profiles {
        wtr.serialize(ProfileRecord {
            column: &p.name,
            is_numeric: p.is_numeric,
            unique_count: p.unique_count,
            missing_count: p.missing_count,
            sample: p.sample.join("; "),
            mean: p.stats.map(|s| s.mean),
            min: p.stats.map(|s| s.min),
            max: p.stats.map(|s| s.max),
            std: p.stats.map(|s| s.std),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
