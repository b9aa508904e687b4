//! Closed-form experiment calculators.
//!
//! Every calculator is a pure function over a small input struct. Input fields are `Option<f64>`:
//! a missing or non-finite value falls back to the documented default. Calculators never panic;
//! results that would be meaningless (NaN, infinity, a non-positive sample size) are reported as a
//! [`CalcError`], whose `Display` text is the user-facing message.
//!
//! - [`power`]: per-arm sample size for a two-arm test
//! - [`readout`]: go/no-go decision for an experiment readout
//! - [`goal`]: compound-growth goal projection
//! - [`alerts`]: spike/drift scan over the first numeric column of a summary
//! - [`planning`]: impact/effort scoring for backlog items

pub mod alerts;
pub mod goal;
pub mod planning;
pub mod power;
pub mod readout;

use thiserror::Error;

pub use alerts::{scan_alerts, AlertReport, AlertThresholds};
pub use goal::{project_goal, GoalInputs, GoalProjection, GoalStatus};
pub use planning::{score_plan_item, PlanItem};
pub use power::{estimate_sample_size, PowerInputs, SampleSizeEstimate};
pub use readout::{decide, run_readout, Decision, Readout, ReadoutInputs, APPROVAL_RULE};

/// Outcomes a calculator cannot turn into a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Unable to compute sample size with the provided inputs.")]
    SampleSize,

    #[error("Unable to project trajectory with the provided numbers.")]
    Projection,

    #[error("No numeric fields available for alerting.")]
    NoNumericFields,

    #[error("Plan items need a name.")]
    MissingName,
}

/// `value` if present and finite, otherwise `fallback`.
pub(crate) fn finite_or(value: Option<f64>, fallback: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(fallback)
}
