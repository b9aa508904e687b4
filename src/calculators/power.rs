//! Sample-size estimate for a two-arm experiment.
//!
//! Uses fixed critical values instead of a statistics library:
//!
//! | input | value | z |
//! |-------|-------|---|
//! | α     | 0.01  | 2.58 |
//! | α     | other | 1.96 |
//! | power | 0.9   | 1.28 |
//! | power | other | 0.84 |

use std::fmt;

use serde::Serialize;

use super::{finite_or, CalcError};

const DEFAULT_BASELINE: f64 = 0.25;
const DEFAULT_MDE: f64 = 0.02;
const DEFAULT_ALPHA: f64 = 0.05;
const DEFAULT_POWER: f64 = 0.8;
const MIN_MDE: f64 = 0.001;
const MIN_SIGMA: f64 = 0.02;

/// Inputs to [`estimate_sample_size`]. `None` or non-finite fields use the defaults
/// (baseline 0.25, MDE 0.02, α 0.05, power 0.8).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerInputs {
    pub baseline: Option<f64>,
    pub mde: Option<f64>,
    pub alpha: Option<f64>,
    pub power: Option<f64>,
}

/// Result of [`estimate_sample_size`], with the effective (defaulted/clamped) inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleSizeEstimate {
    pub baseline: f64,
    pub mde: f64,
    pub alpha: f64,
    pub power: f64,
    /// Assumed standard deviation of the metric.
    pub sigma: f64,
    /// Required samples in each arm.
    pub per_arm: u64,
}

impl fmt::Display for SampleSizeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "For baseline {:.3}, MDE {:.3}, alpha {}, power {}%, target ~{} samples per arm.",
            self.baseline,
            self.mde,
            self.alpha,
            (self.power * 100.0).round(),
            self.per_arm
        )
    }
}

/// Per-arm sample size `ceil(2 * ((zα + zβ) * σ / MDE)²)`.
///
/// The baseline is clamped to be non-negative and the MDE is taken in absolute value with a floor of
/// 0.001. σ is assumed to be 20% of the baseline with a floor of 0.02; a zero baseline assumes
/// σ = 0.1.
pub fn estimate_sample_size(inputs: &PowerInputs) -> Result<SampleSizeEstimate, CalcError> {
    let baseline = finite_or(inputs.baseline, DEFAULT_BASELINE).max(0.0);
    let mde = finite_or(inputs.mde, DEFAULT_MDE).abs().max(MIN_MDE);
    let alpha = finite_or(inputs.alpha, DEFAULT_ALPHA);
    let power = finite_or(inputs.power, DEFAULT_POWER);

    let z_alpha = if alpha == 0.01 { 2.58 } else { 1.96 };
    let z_beta = if power == 0.9 { 1.28 } else { 0.84 };
    let sigma = (if baseline == 0.0 { 0.1 } else { baseline * 0.2 }).max(MIN_SIGMA);

    let n = (2.0 * ((z_alpha + z_beta) * sigma / mde).powi(2)).ceil();
    if !n.is_finite() || n <= 0.0 {
        return Err(CalcError::SampleSize);
    }

    Ok(SampleSizeEstimate {
        baseline,
        mde,
        alpha,
        power,
        sigma,
        per_arm: n as u64,
    })
}
