//! Input validation with diagnostic reporting
//!
//! The calculators themselves accept anything and let degenerate inputs turn
//! into infinities or NaN. This module is the opt-in gate in front of them:
//! it finds every input that would produce a non-finite result and reports
//! them together. It never alters the inputs.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::composition::{HYDROGEN, OXYGEN};
use crate::entities::fuel_cell::FuelCellInputs;
use crate::entities::pem::PemInputs;

/// A single rejected input
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum InvalidInputError {
    #[error("active area must be positive, got {0} cm²")]
    #[diagnostic(
        code(fcc::input::active_area),
        help("current density is current / active area; a zero or negative area makes every density meaningless")
    )]
    NonPositiveActiveArea(f64),

    #[error("{field} is not a finite number ({value})")]
    #[diagnostic(code(fcc::input::not_finite))]
    NotFinite { field: &'static str, value: f64 },

    #[error("number of cells must be at least 1")]
    #[diagnostic(code(fcc::input::cells))]
    NoCells,

    #[error("hydrogen partial pressure is {partial_pressure} atm ({percentage}% {gas} at {pressure} atm)")]
    #[diagnostic(
        code(fcc::input::hydrogen_pressure),
        help("the Nernst voltage takes ln(1 / pH2); give the anode feed some H2 and a positive pressure")
    )]
    NoHydrogenPressure {
        gas: &'static str,
        percentage: f64,
        pressure: f64,
        partial_pressure: f64,
    },

    #[error("oxygen partial pressure is {partial_pressure} atm ({percentage}% {gas} at {pressure} atm)")]
    #[diagnostic(
        code(fcc::input::oxygen_pressure),
        help("the Nernst voltage takes sqrt(pO2); give the cathode feed some O2 and a positive pressure")
    )]
    NoOxygenPressure {
        gas: &'static str,
        percentage: f64,
        pressure: f64,
        partial_pressure: f64,
    },

    #[error("hydrogen flow is {0} mol/s")]
    #[diagnostic(
        code(fcc::input::hydrogen_flow),
        help("fuel utilization divides by the hydrogen flow; set a positive anode flow with H2 in the feed")
    )]
    NoHydrogenFlow(f64),

    #[error("active cell percentage must be positive, got {0}%")]
    #[diagnostic(
        code(fcc::input::active_cell_percentage),
        help("the stack base area is active area / (active cell percentage / 100)")
    )]
    NonPositiveActivePercentage(f64),

    #[error("{variant} stack height must be positive, got {height} mm")]
    #[diagnostic(
        code(fcc::input::stack_height),
        help("a stack with no height has no volume and an infinite power density")
    )]
    NonPositiveStackHeight { variant: &'static str, height: f64 },
}

/// All problems found in one validation pass
#[derive(Debug, Default, Error, Diagnostic)]
#[error("invalid inputs: {}", summary(.errors))]
#[diagnostic(code(fcc::input::invalid))]
pub struct InputErrors {
    #[related]
    errors: Vec<InvalidInputError>,
}

fn summary(errors: &[InvalidInputError]) -> String {
    let count = errors.len();
    if count == 1 {
        "1 error".to_string()
    } else {
        format!("{} errors", count)
    }
}

impl InputErrors {
    pub fn push(&mut self, error: InvalidInputError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, other: InputErrors) {
        self.errors.extend(other.errors);
    }

    pub fn errors(&self) -> &[InvalidInputError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), InputErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn check_finite(errors: &mut InputErrors, fields: &[(&'static str, f64)]) {
    for &(field, value) in fields {
        if !value.is_finite() {
            errors.push(InvalidInputError::NotFinite { field, value });
        }
    }
}

/// Reject operating points that would make the electrochemical core degenerate
pub fn validate_fuel_cell_inputs(inputs: &FuelCellInputs) -> Result<(), InputErrors> {
    let mut errors = InputErrors::default();

    check_finite(
        &mut errors,
        &[
            ("voltage", inputs.voltage),
            ("current", inputs.current),
            ("active_area", inputs.active_area),
            ("temperature", inputs.temperature),
            ("anode_pressure", inputs.anode_pressure),
            ("cathode_pressure", inputs.cathode_pressure),
            ("anode_flow", inputs.anode_flow),
            ("cathode_flow", inputs.cathode_flow),
        ],
    );
    for (gas, pct) in inputs
        .anode_composition
        .iter()
        .chain(inputs.cathode_composition.iter())
    {
        if !pct.is_finite() {
            log::debug!("non-finite composition entry {}={}", gas, pct);
            errors.push(InvalidInputError::NotFinite {
                field: "composition",
                value: pct,
            });
        }
    }

    if inputs.active_area <= 0.0 {
        errors.push(InvalidInputError::NonPositiveActiveArea(inputs.active_area));
    }

    if inputs.number_of_cells == 0 {
        errors.push(InvalidInputError::NoCells);
    }

    let p_h2 = inputs.hydrogen_partial_pressure();
    if p_h2 <= 0.0 {
        errors.push(InvalidInputError::NoHydrogenPressure {
            gas: HYDROGEN,
            percentage: inputs.anode_composition.get(HYDROGEN),
            pressure: inputs.anode_pressure,
            partial_pressure: p_h2,
        });
    }

    let p_o2 = inputs.oxygen_partial_pressure();
    if p_o2 <= 0.0 {
        errors.push(InvalidInputError::NoOxygenPressure {
            gas: OXYGEN,
            percentage: inputs.cathode_composition.get(OXYGEN),
            pressure: inputs.cathode_pressure,
            partial_pressure: p_o2,
        });
    }

    let h2_flow = inputs.hydrogen_flow();
    if h2_flow <= 0.0 {
        errors.push(InvalidInputError::NoHydrogenFlow(h2_flow));
    }

    errors.into_result()
}

/// Reject stack builds with no footprint or no height
pub fn validate_pem_inputs(inputs: &PemInputs) -> Result<(), InputErrors> {
    let mut errors = InputErrors::default();

    check_finite(&mut errors, &inputs.fields());

    if inputs.active_area <= 0.0 {
        errors.push(InvalidInputError::NonPositiveActiveArea(inputs.active_area));
    }

    if inputs.active_cell_percentage <= 0.0 {
        errors.push(InvalidInputError::NonPositiveActivePercentage(
            inputs.active_cell_percentage,
        ));
    }

    for (variant, plate) in [
        ("metal", inputs.metal_plate_thickness),
        ("carbon", inputs.carbon_plate_thickness),
    ] {
        let height = inputs.stack_height(plate);
        if height <= 0.0 {
            errors.push(InvalidInputError::NonPositiveStackHeight { variant, height });
        }
    }

    errors.into_result()
}
