//! `metric-deck` is a small workbench for product-metrics and experimentation work: it loads a
//! tabular dataset, profiles its columns, and runs a handful of closed-form experiment calculators.
//!
//! The primary entrypoints are [`ingestion::load_table`], which reads a
//! [`ingestion::DataSource`] (file, URL, or inline text) into a [`types::Table`], and
//! [`profiling::summarize`], which turns a table into a [`types::Summary`].
//!
//! ## What you can load
//!
//! - **Delimited text**: header line plus data lines, fields separated by commas or tabs. There is
//!   no quoting; blank lines are ignored.
//! - **JSON**: an array of objects. Columns come from the keys of the first object.
//!
//! The format is inferred from the extension (`.json` is JSON, anything else is delimited text) or
//! forced via [`ingestion::LoadOptions`]. URLs require the `http` Cargo feature.
//!
//! ## Quick example: load and profile
//!
//! ```rust
//! use metric_deck::ingestion::{load_table, DataSource, LoadOptions};
//! use metric_deck::profiling::summarize;
//!
//! # fn main() -> Result<(), metric_deck::DeckError> {
//! let source = DataSource::Inline {
//!     name: "weekly.csv".to_string(),
//!     text: "week,ctr,cohort\n1,0.21,a\n2,0.24,b\n3,0.22,a\n".to_string(),
//! };
//! let table = load_table(&source, &LoadOptions::default())?;
//! let summary = summarize(&table);
//!
//! assert_eq!(summary.row_count, 3);
//! assert_eq!(summary.numeric_columns, vec!["week", "ctr"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Calculators
//!
//! ```rust
//! use metric_deck::calculators::{decide, estimate_sample_size, Decision, PowerInputs, APPROVAL_RULE};
//!
//! let est = estimate_sample_size(&PowerInputs {
//!     baseline: Some(0.25),
//!     mde: Some(0.02),
//!     alpha: Some(0.05),
//!     power: Some(0.8),
//! })
//! .unwrap();
//! assert_eq!(est.per_arm, 98);
//!
//! assert_eq!(decide(0.03, 0.02, APPROVAL_RULE, false), Decision::Block);
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: source acquisition, parsers, and load observers
//! - [`types`]: table, row, and summary types
//! - [`profiling`]: type sniffing, column statistics, and the summary builder
//! - [`calculators`]: power, readout, goal, alert, and planning calculators
//! - [`metrics`]: the product metric registry
//! - [`report`]: plain-text renderers and CSV export
//! - [`workspace`]: the session context tying it together
//! - [`error`]: error types

pub mod calculators;
pub mod error;
pub mod ingestion;
pub mod metrics;
pub mod profiling;
pub mod report;
pub mod types;
pub mod workspace;

pub use error::{DeckError, DeckResult};
