//! Spike/drift scan over the first numeric column of a summary.

use std::fmt;

use serde::Serialize;

use crate::types::Summary;

use super::CalcError;

const DEFAULT_SPIKE_PERCENT: f64 = 15.0;
const DEFAULT_DRIFT_PERCENT: f64 = 8.0;

/// Percentage thresholds for [`scan_alerts`]. `None` uses the defaults (spike 15, drift 8).
///
/// A NaN threshold never triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlertThresholds {
    pub spike_percent: Option<f64>,
    pub drift_percent: Option<f64>,
}

/// Result of [`scan_alerts`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertReport {
    /// Column being monitored.
    pub column: String,
    /// Coefficient of variation in percent (`std / mean * 100`), if the column has stats.
    pub spike_ratio: Option<f64>,
    /// Distance from mean to min relative to the mean, in percent, if the column has stats.
    pub drift_ratio: Option<f64>,
    pub spike_detected: bool,
    pub drift_detected: bool,
    /// Experiment holdout share, echoed for context.
    pub holdout_percent: u8,
}

impl fmt::Display for AlertReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Monitoring {}: Spike {}, Drift {}, Holdout {}%",
            self.column,
            if self.spike_detected { "detected" } else { "clear" },
            if self.drift_detected { "detected" } else { "stable" },
            self.holdout_percent
        )
    }
}

/// Scan the first numeric column of `summary`.
///
/// - spike: `std / mean * 100 > spike_percent`
/// - drift: `|mean - min| / |mean| * 100 > drift_percent`
///
/// A zero mean is replaced by 1 in both denominators. A numeric column without stats (no value
/// coerced to a finite number) reports neither flag.
pub fn scan_alerts(
    summary: &Summary,
    thresholds: &AlertThresholds,
    holdout_percent: u8,
) -> Result<AlertReport, CalcError> {
    let (column, stats) = summary.first_numeric().ok_or(CalcError::NoNumericFields)?;
    let spike_limit = thresholds.spike_percent.unwrap_or(DEFAULT_SPIKE_PERCENT);
    let drift_limit = thresholds.drift_percent.unwrap_or(DEFAULT_DRIFT_PERCENT);

    let spike_ratio = stats.map(|s| s.std / nonzero(s.mean) * 100.0);
    let drift_ratio = stats.map(|s| (s.mean - s.min).abs() / nonzero(s.mean.abs()) * 100.0);

    Ok(AlertReport {
        column: column.to_string(),
        spike_ratio,
        drift_ratio,
        spike_detected: spike_ratio.is_some_and(|r| r > spike_limit),
        drift_detected: drift_ratio.is_some_and(|r| r > drift_limit),
        holdout_percent,
    })
}

fn nonzero(v: f64) -> f64 {
    if v == 0.0 || v.is_nan() { 1.0 } else { v }
}

#[cfg(test)]
mod tests {
    use super::{scan_alerts, AlertThresholds};
    use crate::calculators::CalcError;
    use crate::ingestion::delimited::parse_delimited_str;
    use crate::profiling::summarize;

    #[test]
    fn first_numeric_column_is_monitored() {
        let s = summarize(&parse_delimited_str("day,visits\n1,100\n2,101\n3,99\n"));
        // First numeric column is `day`: mean 2, std 0.816 -> 40.8% spike, 50% drift.
        let report = scan_alerts(&s, &AlertThresholds::default(), 10).unwrap();
        assert_eq!(report.column, "day");
        assert!(report.spike_detected);
        assert!(report.drift_detected);

        let s = summarize(&parse_delimited_str("visits\n100\n101\n99\n"));
        let report = scan_alerts(&s, &AlertThresholds::default(), 10).unwrap();
        assert!(!report.spike_detected);
        assert!(!report.drift_detected);
        assert_eq!(report.to_string(), "Monitoring visits: Spike clear, Drift stable, Holdout 10%");
    }

    #[test]
    fn thresholds_override_defaults() {
        let s = summarize(&parse_delimited_str("visits\n100\n101\n99\n"));
        let report = scan_alerts(
            &s,
            &AlertThresholds {
                spike_percent: Some(0.5),
                drift_percent: Some(0.5),
            },
            5,
        )
        .unwrap();
        assert!(report.spike_detected);
        assert!(report.drift_detected);
    }

    #[test]
    fn zero_mean_uses_unit_denominator() {
        let s = summarize(&parse_delimited_str("delta\n-1\n1\n"));
        let report = scan_alerts(&s, &AlertThresholds::default(), 0).unwrap();
        assert_eq!(report.spike_ratio, Some(100.0));
        assert_eq!(report.drift_ratio, Some(100.0));
    }

    #[test]
    fn numeric_column_without_stats_raises_nothing() {
        let s = summarize(&parse_delimited_str("latency\n10ms\n20ms\n"));
        let report = scan_alerts(&s, &AlertThresholds::default(), 10).unwrap();
        assert_eq!(report.spike_ratio, None);
        assert!(!report.spike_detected);
        assert!(!report.drift_detected);
    }

    #[test]
    fn no_numeric_columns_is_an_error() {
        let s = summarize(&parse_delimited_str("name\nada\ngrace\n"));
        let err = scan_alerts(&s, &AlertThresholds::default(), 10).unwrap_err();
        assert_eq!(err, CalcError::NoNumericFields);
        assert_eq!(err.to_string(), "No numeric fields available for alerting.");
    }
}
