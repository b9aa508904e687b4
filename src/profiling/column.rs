//! Per-column profiling: numeric type sniffing and descriptive statistics.

use std::collections::HashSet;

use crate::types::{Cell, ColumnProfile, NumericStats};

use super::numeric::{coerce_cell, looks_numeric};
use super::{ProfileOptions, VarianceMethod};

/// Profile one column from its cells in row order (`None` = absent in that record).
///
/// Sniffing looks only at the leading `options.detection_sample` values; statistics, distinct
/// counts, and missing counts cover the whole column. Absent cells and empty text are missing;
/// JSON `null` is not.
pub fn profile_column(name: &str, values: &[Option<&Cell>], options: &ProfileOptions) -> ColumnProfile {
    let is_numeric = detect_numeric(values, options);

    let clean: Vec<&Cell> = values
        .iter()
        .filter_map(|v| v.filter(|c| !c.is_blank()))
        .collect();

    let numeric: Vec<f64> = clean.iter().filter_map(|c| coerce_cell(c)).collect();
    let unique_count = clean.iter().collect::<HashSet<_>>().len();

    ColumnProfile {
        name: name.to_string(),
        is_numeric,
        unique_count,
        sample: clean
            .iter()
            .take(options.sample_values)
            .map(|c| c.as_str().to_string())
            .collect(),
        stats: compute_stats(&numeric, options.variance),
        missing_count: values.len() - clean.len(),
    }
}

/// `true` if at least `numeric_ratio` of the leading sample looks numeric.
///
/// A value looks numeric when it is a JSON number or non-empty text that starts with a number. An
/// empty sample is never numeric.
pub fn detect_numeric(values: &[Option<&Cell>], options: &ProfileOptions) -> bool {
    let sample = &values[..values.len().min(options.detection_sample)];
    if sample.is_empty() {
        return false;
    }
    let numeric_looking = sample
        .iter()
        .filter(|v| v.is_some_and(looks_numeric))
        .count();
    numeric_looking as f64 >= sample.len() as f64 * options.numeric_ratio
}

/// Mean, min, max, and population standard deviation, or `None` for an empty slice.
pub fn compute_stats(values: &[f64], method: VarianceMethod) -> Option<NumericStats> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;

    let (mean, variance) = match method {
        VarianceMethod::SumOfSquares => {
            let mean = values.iter().sum::<f64>() / n;
            let mean_sq = values.iter().map(|x| x * x).sum::<f64>() / n;
            (mean, mean_sq - mean * mean)
        }
        VarianceMethod::Welford => {
            let mut mean = 0.0;
            let mut m2 = 0.0;
            for (i, x) in values.iter().enumerate() {
                let delta = x - mean;
                mean += delta / (i + 1) as f64;
                m2 += delta * (x - mean);
            }
            (mean, m2 / n)
        }
    };

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(NumericStats {
        mean,
        min,
        max,
        // Cancellation can push the sum-of-squares variance slightly below zero.
        std: variance.max(0.0).sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::{compute_stats, detect_numeric, profile_column};
    use crate::profiling::{ProfileOptions, VarianceMethod};
    use crate::types::Cell;

    fn text(values: &[&str]) -> Vec<Cell> {
        values.iter().copied().map(Cell::from).collect()
    }

    fn some(cells: &[Cell]) -> Vec<Option<&Cell>> {
        cells.iter().map(Some).collect()
    }

    #[test]
    fn integer_column_profile() {
        let cells = text(&["1", "2", "3", "4", "5"]);
        let p = profile_column("n", &some(&cells), &ProfileOptions::default());
        assert!(p.is_numeric);
        assert_eq!(p.unique_count, 5);
        assert_eq!(p.sample, vec!["1", "2", "3"]);
        assert_eq!(p.missing_count, 0);
        let stats = p.stats.unwrap();
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.std, 2f64.sqrt());
    }

    #[test]
    fn categorical_column_profile() {
        let cells = text(&["a", "b", "a", "", "c"]);
        let p = profile_column("c", &some(&cells), &ProfileOptions::default());
        assert!(!p.is_numeric);
        assert_eq!(p.unique_count, 3);
        assert_eq!(p.missing_count, 1);
        assert_eq!(p.sample, vec!["a", "b", "a"]);
        assert!(p.stats.is_none());
    }

    #[test]
    fn detection_threshold_is_sixty_percent_of_sample() {
        let opts = ProfileOptions::default();
        assert!(detect_numeric(&some(&text(&["1", "2", "3", "x", "y"])), &opts));
        assert!(!detect_numeric(&some(&text(&["1", "2", "x", "y", "z"])), &opts));
        assert!(!detect_numeric(&[], &opts));
        assert!(!detect_numeric(&[None, None], &opts));
    }

    #[test]
    fn detection_only_reads_the_leading_sample() {
        let mut cells = text(&["x"; 20]);
        cells.extend(text(&["7"; 100]));
        let p = profile_column("late", &some(&cells), &ProfileOptions::default());
        assert!(!p.is_numeric);
        // Stats still cover the whole column.
        assert_eq!(p.stats.unwrap().mean, 7.0);
    }

    #[test]
    fn loose_sniffing_and_strict_stats_disagree_on_units() {
        let cells = text(&["10ms", "20ms", "30"]);
        let p = profile_column("latency", &some(&cells), &ProfileOptions::default());
        assert!(p.is_numeric);
        let stats = p.stats.unwrap();
        assert_eq!(stats.mean, 30.0);
        assert_eq!(stats.std, 0.0);
    }

    #[test]
    fn absent_values_count_as_missing() {
        let (one, blank) = (Cell::from("1"), Cell::from(""));
        let values = vec![Some(&one), None, Some(&blank), Some(&one)];
        let p = profile_column("sparse", &values, &ProfileOptions::default());
        assert_eq!(p.missing_count, 2);
        assert_eq!(p.unique_count, 1);
    }

    #[test]
    fn unique_count_uses_string_identity() {
        let cells = text(&["1", "1.0", "01"]);
        let p = profile_column("v", &some(&cells), &ProfileOptions::default());
        assert_eq!(p.unique_count, 3);
        assert_eq!(p.stats.unwrap().mean, 1.0);
    }

    #[test]
    fn json_kinds_are_present_but_only_numbers_look_numeric() {
        let cells = vec![Cell::number(2.0), Cell::Null, Cell::Bool(true), Cell::Bool(false), Cell::number(2.0)];
        let p = profile_column("mixed", &some(&cells), &ProfileOptions::default());
        // 2 of 5 look numeric.
        assert!(!p.is_numeric);
        assert_eq!(p.missing_count, 0);
        assert_eq!(p.unique_count, 4);
        assert_eq!(p.sample, vec!["2", "null", "true"]);
        // 2, 0, 1, 0, 2
        assert_eq!(p.stats.unwrap().mean, 1.0);
        assert_eq!(p.stats.unwrap().max, 2.0);
    }

    #[test]
    fn welford_matches_sum_of_squares_on_small_values() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let a = compute_stats(&values, VarianceMethod::SumOfSquares).unwrap();
        let b = compute_stats(&values, VarianceMethod::Welford).unwrap();
        assert_eq!(a.std, 2.0);
        assert!((a.std - b.std).abs() < 1e-12);
        assert_eq!(a.mean, b.mean);
    }

    #[test]
    fn welford_survives_large_offsets() {
        let values: Vec<f64> = [4.0, 7.0, 13.0, 16.0].iter().map(|x| x + 1e9).collect();
        let stable = compute_stats(&values, VarianceMethod::Welford).unwrap();
        assert!((stable.std - 22.5f64.sqrt()).abs() < 1e-6);
    }
}
