//! Impact/effort scoring for roadmap initiatives.

use std::fmt;

use serde::Serialize;

use super::{finite_or, CalcError};

const MIN_WEIGHT: f64 = 0.5;

/// A scored initiative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanItem {
    pub name: String,
    pub impact: f64,
    pub effort: f64,
    /// `impact / effort`.
    pub score: f64,
}

impl fmt::Display for PlanItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: impact {}, effort {}, priority score {:.2}",
            self.name, self.impact, self.effort, self.score
        )
    }
}

/// Score an initiative. Impact and effort default to 1 and are floored at 0.5.
pub fn score_plan_item(name: &str, impact: Option<f64>, effort: Option<f64>) -> Result<PlanItem, CalcError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CalcError::MissingName);
    }
    let impact = finite_or(impact, 1.0).max(MIN_WEIGHT);
    let effort = finite_or(effort, 1.0).max(MIN_WEIGHT);
    Ok(PlanItem {
        name: name.to_string(),
        impact,
        effort,
        score: impact / effort,
    })
}
