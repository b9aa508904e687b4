//! Session context: the current dataset, metric registry, and planning backlog.
//!
//! All dashboard state lives in a [`Workspace`] value that callers pass to each operation. Loading a
//! dataset is split into acquisition/parsing (which may block on I/O) and [`Workspace::apply_table`]
//! (which swaps the table in). Each successful swap bumps [`Workspace::generation`]; when two loads
//! overlap, whichever result is applied last wins and the earlier one is simply overwritten. There is
//! no cancellation of superseded loads.

use crate::calculators::{scan_alerts, AlertReport, AlertThresholds, CalcError, PlanItem};
use crate::error::DeckResult;
use crate::ingestion::{load_table, DataSource, LoadOptions};
use crate::metrics::{Metric, MetricRegistry};
use crate::profiling::{summarize_with, ProfileOptions};
use crate::types::{Summary, Table};

/// Default experiment holdout share, in percent.
pub const DEFAULT_HOLDOUT_PERCENT: u8 = 10;

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadReport {
    /// A dataset with a header was loaded.
    Loaded { rows: usize, columns: usize },
    /// The source had no non-blank lines; the workspace dataset is now empty.
    NoData,
}

/// Explicit session context.
#[derive(Debug, Clone)]
pub struct Workspace {
    table: Table,
    generation: u64,
    metrics: MetricRegistry,
    plan: Vec<PlanItem>,
    holdout_percent: u8,
    profile_options: ProfileOptions,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            table: Table::default(),
            generation: 0,
            metrics: MetricRegistry::default(),
            plan: Vec::new(),
            holdout_percent: DEFAULT_HOLDOUT_PERCENT,
            profile_options: ProfileOptions::default(),
        }
    }
}

impl Workspace {
    /// Empty workspace with no metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Workspace seeded with the sample metrics.
    pub fn with_sample_metrics() -> Self {
        Self {
            metrics: MetricRegistry::with_samples(),
            ..Self::default()
        }
    }

    /// Use non-default profiling options for [`Self::summary`].
    pub fn with_profile_options(mut self, options: ProfileOptions) -> Self {
        self.profile_options = options;
        self
    }

    /// Read, parse, and apply a source.
    ///
    /// On error the current dataset is left untouched. An empty source is not an error: it clears
    /// the dataset and returns [`LoadReport::NoData`].
    pub fn load(&mut self, source: &DataSource, options: &LoadOptions) -> DeckResult<LoadReport> {
        let table = load_table(source, options)?;
        Ok(self.apply_table(table))
    }

    /// Replace the current dataset wholesale.
    pub fn apply_table(&mut self, table: Table) -> LoadReport {
        let report = if table.is_empty() {
            LoadReport::NoData
        } else {
            LoadReport::Loaded {
                rows: table.row_count(),
                columns: table.column_count(),
            }
        };
        self.table = table;
        self.generation += 1;
        log::debug!("workspace generation {} -> {:?}", self.generation, report);
        report
    }

    /// Current dataset.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Number of datasets applied so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rebuild the summary of the current dataset.
    ///
    /// Returns `None` when the dataset has no rows (nothing loaded, an empty source, or a header
    /// with no data lines).
    pub fn summary(&self) -> Option<Summary> {
        if self.table.rows.is_empty() {
            return None;
        }
        Some(summarize_with(&self.table, &self.profile_options))
    }

    /// Run the alert scan against the current dataset.
    pub fn scan_alerts(&self, thresholds: &AlertThresholds) -> Result<AlertReport, CalcError> {
        let summary = self.summary().ok_or(CalcError::NoNumericFields)?;
        scan_alerts(&summary, thresholds, self.holdout_percent)
    }

    pub fn metrics(&self) -> &MetricRegistry {
        &self.metrics
    }

    /// Register a metric.
    pub fn add_metric(&mut self, metric: Metric) {
        self.metrics.add(metric);
    }

    /// Planning backlog in insertion order.
    pub fn plan(&self) -> &[PlanItem] {
        &self.plan
    }

    /// Append a scored initiative to the backlog.
    pub fn add_plan_item(&mut self, item: PlanItem) {
        self.plan.push(item);
    }

    pub fn holdout_percent(&self) -> u8 {
        self.holdout_percent
    }

    /// Set the holdout share, capped at 100.
    pub fn set_holdout_percent(&mut self, percent: u8) {
        self.holdout_percent = percent.min(100);
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadReport, Workspace};
    use crate::calculators::{score_plan_item, AlertThresholds, CalcError};
    use crate::ingestion::delimited::parse_delimited_str;

    #[test]
    fn apply_replaces_wholesale_and_bumps_generation() {
        let mut ws = Workspace::new();
        assert_eq!(ws.generation(), 0);
        assert!(ws.summary().is_none());

        let report = ws.apply_table(parse_delimited_str("a,b\n1,2\n3,4\n"));
        assert_eq!(report, LoadReport::Loaded { rows: 2, columns: 2 });
        assert_eq!(ws.generation(), 1);

        ws.apply_table(parse_delimited_str("c\nx\n"));
        assert_eq!(ws.table().columns, vec!["c"]);
        assert_eq!(ws.generation(), 2);
    }

    #[test]
    fn empty_source_clears_the_dataset() {
        let mut ws = Workspace::new();
        ws.apply_table(parse_delimited_str("a\n1\n"));
        assert_eq!(ws.apply_table(parse_delimited_str("\n\n")), LoadReport::NoData);
        assert!(ws.table().is_empty());
        assert!(ws.summary().is_none());
    }

    #[test]
    fn alerts_need_data() {
        let mut ws = Workspace::new();
        assert_eq!(
            ws.scan_alerts(&AlertThresholds::default()),
            Err(CalcError::NoNumericFields)
        );
        ws.apply_table(parse_delimited_str("v\n100\n100\n"));
        ws.set_holdout_percent(250);
        let report = ws.scan_alerts(&AlertThresholds::default()).unwrap();
        assert_eq!(report.holdout_percent, 100);
    }

    #[test]
    fn plan_items_accumulate() {
        let mut ws = Workspace::with_sample_metrics();
        ws.add_plan_item(score_plan_item("Answer cards", Some(4.0), Some(2.0)).unwrap());
        ws.add_plan_item(score_plan_item("Spellcheck", Some(1.0), Some(1.0)).unwrap());
        assert_eq!(ws.plan().len(), 2);
        assert_eq!(ws.metrics().len(), 3);
    }
}
