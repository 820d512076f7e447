//! Performance curve - sampled voltage/current/power relationship
//!
//! The curve is a linearized polarization model: voltage is swept from zero
//! up to the Nernst voltage, and current is the remaining voltage headroom
//! divided by the activation and ohmic losses. The concentration loss is not
//! part of the linearization.

use serde::{Deserialize, Serialize};

use crate::entities::fuel_cell::{CalculationResults, FuelCellInputs};

/// Number of samples on the curve, both ends included
pub const CURVE_SAMPLES: usize = 11;

/// One sample on the performance curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
}

/// Sample the curve at voltage fractions 0.0, 0.1, ..., 1.0 of the Nernst voltage
///
/// The fraction is derived from an integer step so the sample count is always
/// [`CURVE_SAMPLES`], with no accumulated floating-point drift.
pub fn generate_curve(
    _inputs: &FuelCellInputs,
    results: &CalculationResults,
) -> Vec<ChartDataPoint> {
    let steps = CURVE_SAMPLES - 1;
    let resistance = results.activation_loss + results.ohmic_loss;

    (0..=steps)
        .map(|step| {
            let fraction = step as f64 / steps as f64;
            let voltage = fraction * results.nernst_voltage;
            let current = (results.nernst_voltage - voltage) / resistance;

            ChartDataPoint {
                voltage,
                current,
                power: voltage * current,
            }
        })
        .collect()
}

/// The sample with the highest power, if any power value is comparable
pub fn peak_power(curve: &[ChartDataPoint]) -> Option<ChartDataPoint> {
    curve
        .iter()
        .filter(|p| !p.power.is_nan())
        .copied()
        .max_by(|a, b| a.power.total_cmp(&b.power))
}
