//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`load_table`] (from [`unified`]) which:
//!
//! - reads a [`DataSource`] (file, URL, or inline text) into a string
//! - infers the format from the extension (or you can override via [`LoadOptions`])
//! - parses the text into an in-memory [`crate::types::Table`]
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific parsers are also available under:
//! - [`delimited`]
//! - [`json`]

pub mod delimited;
pub mod json;
pub mod observability;
pub mod source;
pub mod unified;

pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    LogObserver, StdErrObserver,
};
pub use source::DataSource;
pub use unified::{load_table, parse_text, LoadOptions, SourceFormat};
