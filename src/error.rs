use thiserror::Error;

/// Convenience result type for ingestion and export operations.
pub type DeckResult<T> = Result<T, DeckError>;

/// Error type returned by source loading, parsing, and export functions.
///
/// This is a single error enum shared across delimited/JSON ingestion and CSV export. Errors of this
/// type are caught at the ingestion boundary ([`crate::workspace::Workspace::load`]) and never leave
/// the current dataset partially updated.
#[derive(Debug, Error)]
pub enum DeckError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Network fetch failed or the server answered with a non-success status.
    #[error("unable to fetch '{url}': {message}")]
    Http { url: String, message: String },

    /// The source decoded, but not into the expected shape.
    #[error("format error: {message}")]
    Format { message: String },

    /// Malformed JSON syntax. Carries the decoder message.
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer error (profile export).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The source kind is not available in this build (e.g. URLs without the `http` feature).
    #[error("unsupported source: {message}")]
    UnsupportedSource { message: String },
}

impl DeckError {
    /// `true` for failures acquiring the source text (file or network), as opposed to failures
    /// interpreting it.
    pub fn is_source_error(&self) -> bool {
        matches!(self, DeckError::Io(_) | DeckError::Http { .. })
    }
}
