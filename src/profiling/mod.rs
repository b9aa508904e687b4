//! Dataset profiling.
//!
//! The profiling layer turns a [`crate::types::Table`] into a [`crate::types::Summary`]:
//!
//! - [`column`]: numeric type sniffing and per-column statistics
//! - [`numeric`]: the loose (prefix) and strict number rules used by sniffing and statistics
//! - [`summary`]: the dataset-wide fold over all columns
//!
//! ## Example
//!
//! ```rust
//! use metric_deck::ingestion::delimited::parse_delimited_str;
//! use metric_deck::profiling::summarize;
//!
//! let table = parse_delimited_str("user,sessions\nu1,3\nu2,5\nu3,\n");
//! let summary = summarize(&table);
//!
//! assert_eq!(summary.row_count, 3);
//! assert_eq!(summary.missing_count, 1);
//! assert_eq!(summary.numeric_columns, vec!["sessions"]);
//! assert_eq!(summary.profile("sessions").unwrap().stats.unwrap().mean, 4.0);
//! ```

pub mod column;
pub mod numeric;
pub mod summary;

pub use column::{compute_stats, detect_numeric, profile_column};
pub use summary::{summarize, summarize_with};

/// How the profiler computes variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarianceMethod {
    /// `Σx²/n − mean²`. Loses precision when the mean is large relative to the spread.
    #[default]
    SumOfSquares,
    /// Welford's single-pass update.
    Welford,
}

/// Options controlling profiling.
///
/// Use [`Default`] for the standard policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileOptions {
    /// Number of leading values inspected by numeric sniffing.
    pub detection_sample: usize,
    /// Fraction of the sniffing sample that must look numeric.
    pub numeric_ratio: f64,
    /// Number of raw values kept in [`crate::types::ColumnProfile::sample`].
    pub sample_values: usize,
    /// Variance formula.
    pub variance: VarianceMethod,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            detection_sample: 20,
            numeric_ratio: 0.6,
            sample_values: 3,
            variance: VarianceMethod::SumOfSquares,
        }
    }
}
