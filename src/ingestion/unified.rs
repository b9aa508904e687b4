//! Unified load entrypoint.
//!
//! Most callers should use [`load_table`], which reads a [`DataSource`] and parses it into a
//! [`crate::types::Table`].
//!
//! - If [`LoadOptions::format`] is `None`, the format is inferred from the source's extension.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::sync::Arc;

use crate::error::{DeckError, DeckResult};
use crate::types::Table;

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::source::DataSource;
use super::{delimited, json};

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma- or tab-separated text with a header line.
    Delimited,
    /// JSON array of objects.
    Json,
}

impl SourceFormat {
    /// Format for a file extension (case-insensitive). `json` selects JSON; everything else,
    /// including no extension, is delimited text.
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some(e) if e.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Delimited,
        }
    }
}

/// Options controlling [`load_table`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, infer the format from the source extension.
    pub format: Option<SourceFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Parse already-acquired text in the given format.
///
/// Delimited text never fails (empty input yields an empty table); JSON can fail with
/// [`DeckError::Json`] or [`DeckError::Format`].
pub fn parse_text(text: &str, format: SourceFormat) -> DeckResult<Table> {
    match format {
        SourceFormat::Delimited => Ok(delimited::parse_delimited_str(text)),
        SourceFormat::Json => json::parse_json_str(text),
    }
}

/// Read and parse a source.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column stats (an empty table still counts as success)
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```
/// use metric_deck::ingestion::{load_table, DataSource, LoadOptions};
///
/// # fn main() -> Result<(), metric_deck::DeckError> {
/// let source = DataSource::Inline {
///     name: "paste.csv".to_string(),
///     text: "week,signups\n1,120\n2,134\n".to_string(),
/// };
/// let table = load_table(&source, &LoadOptions::default())?;
/// assert_eq!(table.row_count(), 2);
/// # Ok(())
/// # }
/// ```
pub fn load_table(source: &DataSource, options: &LoadOptions) -> DeckResult<Table> {
    let format = options
        .format
        .unwrap_or_else(|| SourceFormat::from_extension(source.extension().as_deref()));

    let ctx = IngestionContext {
        source: source.to_string(),
        format,
    };

    log::debug!("loading {} as {:?}", ctx.source, format);
    let result = source
        .read_text()
        .and_then(|text| parse_text(&text, format));

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(table) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: table.row_count(),
                    columns: table.column_count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &DeckError) -> IngestionSeverity {
    match e {
        DeckError::Io(_) | DeckError::Http { .. } => IngestionSeverity::Critical,
        DeckError::Format { .. } | DeckError::Json(_) | DeckError::Csv(_) => IngestionSeverity::Error,
        DeckError::UnsupportedSource { .. } => IngestionSeverity::Warning,
    }
}
