//! CLI command implementations

pub mod calc;
pub mod completions;
pub mod config;
pub mod curve;
pub mod new;
pub mod pem;
pub mod validate;

use miette::Result;

use crate::entities::{Evaluation, Scenario};

/// Evaluate with or without up-front validation
///
/// Without validation degenerate inputs still produce a result; a warning
/// names the non-finite fields (logged while computing) and points at `--strict`.
pub(crate) fn evaluate(scenario: &Scenario, strict: bool) -> Result<Evaluation> {
    if strict {
        return Ok(scenario.evaluate_checked()?);
    }

    let evaluation = scenario.evaluate();
    if evaluation.has_non_finite() {
        log::warn!("some results are not finite; rerun with --strict to see which inputs are degenerate");
    }
    Ok(evaluation)
}
