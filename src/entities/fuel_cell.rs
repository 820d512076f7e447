//! Fuel cell operating point - electrochemical performance metrics
//!
//! Every calculation here is a closed-form function of a [`FuelCellInputs`]
//! snapshot. Nothing is validated: a zero active area, an absent hydrogen
//! feed or a zero oxygen partial pressure produce infinities or NaN in the
//! affected fields instead of errors. See [`crate::core::validation`] for an
//! opt-in check that rejects such inputs up front.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::composition::{GasComposition, HYDROGEN, OXYGEN};
use crate::core::constants::{
    ACTIVATION_COEFFICIENT, CONCENTRATION_COEFFICIENT, CONCENTRATION_REFERENCE_DENSITY,
    ELECTRONS_PER_H2, FARADAY_CONSTANT, GAS_CONSTANT, KELVIN_OFFSET, MOLAR_VOLUME,
    OHMIC_RESISTANCE, SECONDS_PER_MINUTE, STANDARD_POTENTIAL,
};

/// Fuel cell chemistry
///
/// The electrochemical formulas are the same for every chemistry; only
/// [`FuelCellType::Pem`] unlocks the stack geometry extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
#[value(rename_all = "UPPER")]
pub enum FuelCellType {
    /// Proton exchange membrane
    #[default]
    Pem,
    /// Solid oxide
    Sofc,
    /// Alkaline
    Afc,
    /// Molten carbonate
    Mcfc,
    /// Phosphoric acid
    Pafc,
}

impl FuelCellType {
    pub fn has_geometry_model(&self) -> bool {
        matches!(self, FuelCellType::Pem)
    }
}

impl std::fmt::Display for FuelCellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FuelCellType::Pem => write!(f, "PEM"),
            FuelCellType::Sofc => write!(f, "SOFC"),
            FuelCellType::Afc => write!(f, "AFC"),
            FuelCellType::Mcfc => write!(f, "MCFC"),
            FuelCellType::Pafc => write!(f, "PAFC"),
        }
    }
}

/// Operating-condition snapshot for one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FuelCellInputs {
    /// Cell voltage (V)
    pub voltage: f64,

    /// Cell current (A)
    pub current: f64,

    /// Active electrode area (cm²)
    pub active_area: f64,

    /// Operating temperature (°C)
    pub temperature: f64,

    /// Anode pressure (atm)
    pub anode_pressure: f64,

    /// Cathode pressure (atm)
    pub cathode_pressure: f64,

    /// Anode gas flow (L/min)
    pub anode_flow: f64,

    /// Cathode gas flow (L/min)
    pub cathode_flow: f64,

    /// Anode feed, gas symbol → percentage (not normalized)
    pub anode_composition: GasComposition,

    /// Cathode feed, gas symbol → percentage (not normalized)
    pub cathode_composition: GasComposition,

    pub fuel_cell_type: FuelCellType,

    pub number_of_cells: u32,
}

impl Default for FuelCellInputs {
    fn default() -> Self {
        Self {
            voltage: 0.7,
            current: 10.0,
            active_area: 100.0,
            temperature: 80.0,
            anode_pressure: 1.0,
            cathode_pressure: 1.0,
            anode_flow: 1.0,
            cathode_flow: 2.0,
            anode_composition: GasComposition::default_anode(),
            cathode_composition: GasComposition::default_cathode(),
            fuel_cell_type: FuelCellType::Pem,
            number_of_cells: 1,
        }
    }
}

impl FuelCellInputs {
    /// Operating temperature in Kelvin
    pub fn temperature_kelvin(&self) -> f64 {
        self.temperature + KELVIN_OFFSET
    }

    /// Hydrogen partial pressure at the anode (atm)
    pub fn hydrogen_partial_pressure(&self) -> f64 {
        self.anode_composition.fraction(HYDROGEN) * self.anode_pressure
    }

    /// Oxygen partial pressure at the cathode (atm)
    pub fn oxygen_partial_pressure(&self) -> f64 {
        self.cathode_composition.fraction(OXYGEN) * self.cathode_pressure
    }

    /// Hydrogen molar flow (mol/s), from L/min through the ideal-gas molar volume
    pub fn hydrogen_flow(&self) -> f64 {
        let litres_per_second =
            self.anode_flow * self.anode_composition.get(HYDROGEN) / 100.0 / SECONDS_PER_MINUTE;
        litres_per_second / MOLAR_VOLUME
    }
}

/// Current and power per unit active area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Densities {
    /// A/cm²
    pub current_density: f64,
    /// W/cm²
    pub power_density: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Efficiencies {
    /// Cell voltage over the 1.23 V standard potential
    pub electrical: f64,
    /// Fraction of supplied hydrogen consumed
    pub fuel_utilization: f64,
}

/// Overpotential losses (V)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Losses {
    pub activation: f64,
    pub ohmic: f64,
    pub concentration: f64,
}

impl Losses {
    pub fn total(&self) -> f64 {
        self.activation + self.ohmic + self.concentration
    }
}

/// Output of the electrochemical core
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResults {
    /// A/cm²
    pub current_density: f64,
    /// W/cm²
    pub power_density: f64,
    /// Ratio, 0..1 for physical inputs
    pub electrical_efficiency: f64,
    /// Ratio, 0..1 for physical inputs
    pub fuel_utilization: f64,
    /// V
    pub activation_loss: f64,
    /// V
    pub ohmic_loss: f64,
    /// V
    pub concentration_loss: f64,
    /// V
    pub nernst_voltage: f64,
    /// W, for the whole stack
    pub total_power: f64,
}

impl CalculationResults {
    /// Field name and value, in display order
    pub fn fields(&self) -> [(&'static str, f64); 9] {
        [
            ("current_density", self.current_density),
            ("power_density", self.power_density),
            ("electrical_efficiency", self.electrical_efficiency),
            ("fuel_utilization", self.fuel_utilization),
            ("activation_loss", self.activation_loss),
            ("ohmic_loss", self.ohmic_loss),
            ("concentration_loss", self.concentration_loss),
            ("nernst_voltage", self.nernst_voltage),
            ("total_power", self.total_power),
        ]
    }

    /// Names of fields that are infinite or NaN
    pub fn non_finite_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, v)| !v.is_finite())
            .map(|(name, _)| name)
            .collect()
    }
}

/// `j = I / A`, `P'' = V * j`
pub fn calculate_densities(inputs: &FuelCellInputs) -> Densities {
    let current_density = inputs.current / inputs.active_area;
    let power_density = inputs.voltage * current_density;

    Densities {
        current_density,
        power_density,
    }
}

pub fn calculate_efficiencies(inputs: &FuelCellInputs) -> Efficiencies {
    let hydrogen_flow = inputs.hydrogen_flow();

    Efficiencies {
        electrical: inputs.voltage / STANDARD_POTENTIAL,
        fuel_utilization: inputs.current / (ELECTRONS_PER_H2 * FARADAY_CONSTANT * hydrogen_flow),
    }
}

/// Fixed-coefficient loss approximations, functions of current density only
pub fn calculate_losses(inputs: &FuelCellInputs) -> Losses {
    let current_density = inputs.current / inputs.active_area;

    Losses {
        activation: ACTIVATION_COEFFICIENT * (current_density + 1.0).ln(),
        ohmic: OHMIC_RESISTANCE * current_density,
        concentration: CONCENTRATION_COEFFICIENT
            * (current_density / CONCENTRATION_REFERENCE_DENSITY).exp(),
    }
}

/// Temperature and pressure corrected open-circuit voltage (V)
///
/// `E = E0 - RT/(4F) * ln(1 / (pH2 * sqrt(pO2)))`
pub fn calculate_nernst_voltage(inputs: &FuelCellInputs) -> f64 {
    let t = inputs.temperature_kelvin();
    let p_h2 = inputs.hydrogen_partial_pressure();
    let p_o2 = inputs.oxygen_partial_pressure();

    STANDARD_POTENTIAL
        - (GAS_CONSTANT * t / (4.0 * FARADAY_CONSTANT)) * (1.0 / (p_h2 * p_o2.sqrt())).ln()
}

/// Run all four calculators and compose the stack-level result
pub fn compute_core(inputs: &FuelCellInputs) -> CalculationResults {
    let densities = calculate_densities(inputs);
    let efficiencies = calculate_efficiencies(inputs);
    let losses = calculate_losses(inputs);
    let nernst_voltage = calculate_nernst_voltage(inputs);

    log::debug!(
        "densities: j={} A/cm², p={} W/cm²",
        densities.current_density,
        densities.power_density
    );
    log::debug!(
        "losses: activation={} V, ohmic={} V, concentration={} V; nernst={} V",
        losses.activation,
        losses.ohmic,
        losses.concentration,
        nernst_voltage
    );

    let results = CalculationResults {
        current_density: densities.current_density,
        power_density: densities.power_density,
        electrical_efficiency: efficiencies.electrical,
        fuel_utilization: efficiencies.fuel_utilization,
        activation_loss: losses.activation,
        ohmic_loss: losses.ohmic,
        concentration_loss: losses.concentration,
        nernst_voltage,
        total_power: densities.power_density
            * inputs.active_area
            * f64::from(inputs.number_of_cells),
    };

    for (field, value) in results.fields() {
        if !value.is_finite() {
            log::warn!("{} is not finite ({})", field, value);
        }
    }

    results
}
