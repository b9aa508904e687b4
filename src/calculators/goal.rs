//! Goal projection under compound weekly growth.

use std::fmt;

use serde::Serialize;

use super::{finite_or, CalcError};

const MIN_LIFT: f64 = -0.99;
/// Stand-in for a zero current value when solving for the required lift.
const ZERO_CURRENT_EPSILON: f64 = 0.01;

/// Inputs to [`project_goal`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GoalInputs {
    /// Current value; defaults to 0, clamped to be non-negative.
    pub current: Option<f64>,
    /// Target value; defaults to 0, clamped to be non-negative.
    pub target: Option<f64>,
    /// Horizon in weeks; defaults to 1, floor 1.
    pub weeks: Option<f64>,
    /// Expected weekly lift in percent; defaults to 0, floor -99.
    pub lift_percent: Option<f64>,
}

/// Whether the projection reaches the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GoalStatus {
    OnTrack,
    Stretch,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalStatus::OnTrack => f.write_str("On track"),
            GoalStatus::Stretch => f.write_str("Stretch"),
        }
    }
}

/// Result of [`project_goal`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProjection {
    pub current: f64,
    pub target: f64,
    pub weeks: f64,
    /// Effective weekly lift as a fraction (after clamping).
    pub lift: f64,
    /// `current * (1 + lift)^weeks`.
    pub projected: f64,
    /// Weekly lift (fraction) needed to reach the target in `weeks`.
    pub required_weekly_lift: f64,
    pub status: GoalStatus,
}

impl fmt::Display for GoalProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Projected {:.3} in {} weeks ({}). Required weekly lift to hit target: {:.2}%.",
            self.projected,
            self.weeks,
            self.status,
            self.required_weekly_lift * 100.0
        )
    }
}

/// Project `current` forward and solve for the weekly lift that reaches `target`.
///
/// The required lift is `(target / current)^(1 / weeks) - 1`, using 0.01 in place of a zero current
/// value, and 0 when the target is 0.
pub fn project_goal(inputs: &GoalInputs) -> Result<GoalProjection, CalcError> {
    let current = finite_or(inputs.current, 0.0).max(0.0);
    let target = finite_or(inputs.target, 0.0).max(0.0);
    let weeks = finite_or(inputs.weeks, 1.0).max(1.0);
    let lift = (finite_or(inputs.lift_percent, 0.0) / 100.0).max(MIN_LIFT);

    let projected = current * (1.0 + lift).powf(weeks);
    let required_weekly_lift = if target > 0.0 {
        let base = if current == 0.0 { ZERO_CURRENT_EPSILON } else { current };
        (target / base).powf(1.0 / weeks) - 1.0
    } else {
        0.0
    };

    if !projected.is_finite() || !required_weekly_lift.is_finite() {
        return Err(CalcError::Projection);
    }

    Ok(GoalProjection {
        current,
        target,
        weeks,
        lift,
        projected,
        required_weekly_lift,
        status: if projected >= target {
            GoalStatus::OnTrack
        } else {
            GoalStatus::Stretch
        },
    })
}
