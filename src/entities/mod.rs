//! Value types and their calculations
//!
//! FCC works on the following types:
//!
//! **Electrochemistry:**
//! - [`FuelCellInputs`] - Operating conditions for one calculation
//! - [`CalculationResults`] - Densities, efficiencies, losses, Nernst voltage, stack power
//!
//! **Stack Geometry (PEM only):**
//! - [`PemInputs`] - Layer thicknesses and active-area share
//! - [`PemResults`] - Metal and carbon stack height, volume and power density
//!
//! **Curves and Scenarios:**
//! - [`ChartDataPoint`] - One sample of the voltage/current/power curve
//! - [`Scenario`] - A named operating point as kept in a scenario file

pub mod curve;
pub mod fuel_cell;
pub mod pem;
pub mod scenario;

pub use curve::{generate_curve, ChartDataPoint, CURVE_SAMPLES};
pub use fuel_cell::{
    calculate_densities, calculate_efficiencies, calculate_losses, calculate_nernst_voltage,
    compute_core, CalculationResults, Densities, Efficiencies, FuelCellInputs, FuelCellType,
    Losses,
};
pub use pem::{compute_pem, PemInputs, PemResults};
pub use scenario::{Evaluation, Scenario};
