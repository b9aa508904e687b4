//! Go/no-go decision for an experiment readout.

use std::fmt;

use serde::Serialize;

use super::finite_or;

/// Rule text that gates shipping on an explicit data-science sign-off.
pub const APPROVAL_RULE: &str = "DS approval required";

const DEFAULT_OBSERVED: f64 = 0.0;
const DEFAULT_MDE: f64 = 0.01;
const MIN_MDE: f64 = 0.001;
const NO_GUARDRAILS: &str = "Guardrails not documented";

/// Readout decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decision {
    /// Effect clears the MDE and nothing blocks shipping.
    Go,
    /// The approval-gated rule applies and approval is missing.
    Block,
    /// Anything else.
    Review,
}

impl Decision {
    /// One-line explanation shown next to the decision.
    pub fn status(self) -> &'static str {
        match self {
            Decision::Go => "Effect clears MDE and guardrails look healthy.",
            Decision::Block => "Needs DS approval before shipping.",
            Decision::Review => "Neutral: Awaiting more data.",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Decision::Go => "Go",
            Decision::Block => "Block",
            Decision::Review => "Review",
        };
        f.write_str(s)
    }
}

/// Inputs to [`run_readout`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadoutInputs {
    /// Observed effect; defaults to 0, clamped to be non-negative.
    pub observed: Option<f64>,
    /// Minimum detectable effect; defaults to 0.01, absolute value, floor 0.001.
    pub mde: Option<f64>,
    /// Free-text decision rule. [`APPROVAL_RULE`] is special-cased.
    pub rule: String,
    /// Whether data science signed off.
    pub approved: bool,
    /// Guardrail notes to echo in the readout text.
    pub guardrails: Option<String>,
}

/// Result of [`run_readout`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readout {
    pub observed: f64,
    pub mde: f64,
    pub rule: String,
    pub guardrails: String,
    pub decision: Decision,
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Readout: Observed effect {} vs MDE {}. Rule: {}. Guardrails: {}. Decision: {}. {}",
            self.observed,
            self.mde,
            self.rule,
            self.guardrails,
            self.decision,
            self.decision.status()
        )
    }
}

/// Core decision rule.
///
/// `Block` takes precedence whenever the approval-gated rule applies without approval, regardless of
/// the effect size.
pub fn decide(observed: f64, mde: f64, rule: &str, approved: bool) -> Decision {
    let gated = rule == APPROVAL_RULE;
    if gated && !approved {
        Decision::Block
    } else if observed >= mde {
        Decision::Go
    } else {
        Decision::Review
    }
}

/// Normalize inputs and decide.
pub fn run_readout(inputs: &ReadoutInputs) -> Readout {
    let observed = finite_or(inputs.observed, DEFAULT_OBSERVED).max(0.0);
    let mde = finite_or(inputs.mde, DEFAULT_MDE).abs().max(MIN_MDE);
    let guardrails = inputs
        .guardrails
        .as_deref()
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .unwrap_or(NO_GUARDRAILS)
        .to_string();

    Readout {
        observed,
        mde,
        rule: inputs.rule.clone(),
        guardrails,
        decision: decide(observed, mde, &inputs.rule, inputs.approved),
    }
}

#[cfg(test)]
mod tests {
    use super::{decide, run_readout, Decision, ReadoutInputs, APPROVAL_RULE};

    #[test]
    fn approval_rule_blocks_without_sign_off() {
        assert_eq!(decide(0.05, 0.02, APPROVAL_RULE, false), Decision::Block);
        assert_eq!(decide(0.0, 0.02, APPROVAL_RULE, false), Decision::Block);
        assert_eq!(decide(0.05, 0.02, APPROVAL_RULE, true), Decision::Go);
    }

    #[test]
    fn other_rules_only_need_the_effect() {
        assert_eq!(decide(0.02, 0.02, "Ship if significant", false), Decision::Go);
        assert_eq!(decide(0.01, 0.02, "Ship if significant", false), Decision::Review);
        assert_eq!(decide(0.01, 0.02, APPROVAL_RULE, true), Decision::Review);
    }

    #[test]
    fn readout_applies_defaults_and_renders() {
        let readout = run_readout(&ReadoutInputs {
            observed: Some(-1.0),
            mde: None,
            rule: "Ship if significant".to_string(),
            approved: false,
            guardrails: Some("  ".to_string()),
        });
        assert_eq!(readout.observed, 0.0);
        assert_eq!(readout.mde, 0.01);
        assert_eq!(readout.decision, Decision::Review);
        assert_eq!(
            readout.to_string(),
            "Readout: Observed effect 0 vs MDE 0.01. Rule: Ship if significant. \
             Guardrails: Guardrails not documented. Decision: Review. Neutral: Awaiting more data."
        );
    }
}
