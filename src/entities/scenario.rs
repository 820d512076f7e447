//! Scenario - a named operating point with optional PEM stack build
//!
//! A scenario is what a `fcc` user keeps on disk: the operating-condition
//! inputs, and for PEM cells the stack layer thicknesses. Evaluating it runs
//! the full pipeline: electrochemical core, then stack geometry for PEM
//! cells, then the performance curve.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::validation::{validate_fuel_cell_inputs, validate_pem_inputs, InputErrors};
use crate::entities::curve::{generate_curve, ChartDataPoint};
use crate::entities::fuel_cell::{compute_core, CalculationResults, FuelCellInputs};
use crate::entities::pem::{compute_pem, PemInputs, PemResults};

/// Scenario file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Scenario title
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Operating conditions
    #[serde(default)]
    pub fuel_cell: FuelCellInputs,

    /// PEM stack build (defaults apply when absent and the type is PEM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pem: Option<PemInputs>,
}

/// Everything computed for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub results: CalculationResults,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pem: Option<PemResults>,

    pub curve: Vec<ChartDataPoint>,
}

impl Evaluation {
    /// True when any core or PEM field is infinite or NaN
    pub fn has_non_finite(&self) -> bool {
        let core = self.results.fields().iter().any(|(_, v)| !v.is_finite());
        let pem = self
            .pem
            .map(|p| p.fields().iter().any(|(_, v)| !v.is_finite()))
            .unwrap_or(false);
        core || pem
    }
}

impl Scenario {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            created: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Stack build used for geometry, or `None` for chemistries without a model
    pub fn effective_pem_inputs(&self) -> Option<PemInputs> {
        if self.fuel_cell.fuel_cell_type.has_geometry_model() {
            Some(self.pem.clone().unwrap_or_default())
        } else {
            if self.pem.is_some() {
                log::warn!(
                    "pem block ignored for {} fuel cell; only PEM has a stack geometry model",
                    self.fuel_cell.fuel_cell_type
                );
            }
            None
        }
    }

    /// Run the pipeline without validation; degenerate inputs yield non-finite fields
    pub fn evaluate(&self) -> Evaluation {
        log::debug!(
            "evaluating '{}' ({} x {} cells)",
            self.title,
            self.fuel_cell.fuel_cell_type,
            self.fuel_cell.number_of_cells
        );

        let results = compute_core(&self.fuel_cell);
        let pem = self
            .effective_pem_inputs()
            .map(|pem| compute_pem(&pem, results.total_power));
        let curve = generate_curve(&self.fuel_cell, &results);

        Evaluation {
            results,
            pem,
            curve,
        }
    }

    /// Check every input first, then [`Scenario::evaluate`]
    pub fn evaluate_checked(&self) -> Result<Evaluation, InputErrors> {
        self.validate()?;
        Ok(self.evaluate())
    }

    /// Collect every input problem in one report
    pub fn validate(&self) -> Result<(), InputErrors> {
        let mut errors = match validate_fuel_cell_inputs(&self.fuel_cell) {
            Ok(()) => InputErrors::default(),
            Err(e) => e,
        };

        if self.fuel_cell.fuel_cell_type.has_geometry_model() {
            let pem = self.pem.clone().unwrap_or_default();
            if let Err(e) = validate_pem_inputs(&pem) {
                errors.extend(e);
            }
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::curve::CURVE_SAMPLES;
    use crate::entities::fuel_cell::FuelCellType;

    #[test]
    fn test_pem_scenario_gets_geometry() {
        let scenario = Scenario::new("Baseline");
        let eval = scenario.evaluate();

        assert!((eval.results.total_power - 7.0).abs() < 1e-9);
        let pem = eval.pem.expect("PEM scenario should size the stack");
        assert!((pem.metal_stack_height - 25.7).abs() < 1e-9);
        assert_eq!(eval.curve.len(), CURVE_SAMPLES);
    }

    #[test]
    fn test_non_pem_scenario_skips_geometry() {
        let mut scenario = Scenario::new("SOFC");
        scenario.fuel_cell.fuel_cell_type = FuelCellType::Sofc;
        scenario.pem = Some(PemInputs::default());

        let eval = scenario.evaluate();
        assert!(eval.pem.is_none());
        assert_eq!(eval.curve.len(), CURVE_SAMPLES);
    }

    #[test]
    fn test_stack_power_flows_into_geometry() {
        let mut scenario = Scenario::new("Stack");
        scenario.fuel_cell.number_of_cells = 20;
        scenario.pem = Some(PemInputs {
            number_of_cells: 20,
            ..Default::default()
        });

        let eval = scenario.evaluate();
        let pem = eval.pem.unwrap();
        let expected = eval.results.total_power / pem.metal_stack_volume / 1000.0;
        assert_eq!(pem.metal_stack_power_density, expected);
    }

    #[test]
    fn test_checked_matches_unchecked_for_valid_inputs() {
        let scenario = Scenario::new("Valid");
        let checked = scenario.evaluate_checked().unwrap();
        let unchecked = scenario.evaluate();
        assert_eq!(checked, unchecked);
        assert!(!checked.has_non_finite());
    }

    #[test]
    fn test_checked_rejects_zero_area() {
        let mut scenario = Scenario::new("Broken");
        scenario.fuel_cell.active_area = 0.0;

        let err = scenario.evaluate_checked().unwrap_err();
        assert_eq!(err.len(), 1);

        // The unchecked path still produces a result
        assert!(scenario.evaluate().has_non_finite());
    }

    #[test]
    fn test_validation_skips_pem_for_other_chemistries() {
        let mut scenario = Scenario::new("AFC");
        scenario.fuel_cell.fuel_cell_type = FuelCellType::Afc;
        scenario.pem = Some(PemInputs {
            active_cell_percentage: 0.0,
            ..Default::default()
        });
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_scenario_yaml_roundtrip() {
        let yaml = r#"
title: Reformate feed
fuel_cell:
  voltage: 0.68
  anode_composition: { H2: 75, CO2: 25 }
  fuel_cell_type: PEM
  number_of_cells: 30
pem:
  number_of_cells: 30
  carbon_plate_thickness: 1.5
"#;
        let scenario: Scenario = serde_yml::from_str(yaml).unwrap();
        assert_eq!(scenario.title, "Reformate feed");
        assert_eq!(scenario.fuel_cell.anode_composition.get("H2"), 75.0);
        assert_eq!(scenario.fuel_cell.current, 10.0);
        let pem = scenario.pem.as_ref().unwrap();
        assert_eq!(pem.carbon_plate_thickness, 1.5);
        assert_eq!(pem.mea_thickness, 0.5);

        let out = serde_yml::to_string(&scenario).unwrap();
        let parsed: Scenario = serde_yml::from_str(&out).unwrap();
        assert_eq!(parsed, scenario);
    }
}
