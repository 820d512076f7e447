//! Physical constants used by the electrochemical calculations

/// Faraday constant (C/mol)
pub const FARADAY_CONSTANT: f64 = 96485.0;

/// Universal gas constant (J/(mol·K))
pub const GAS_CONSTANT: f64 = 8.314;

/// Standard thermodynamic cell potential for H2/O2 at 25 °C (V)
pub const STANDARD_POTENTIAL: f64 = 1.23;

/// Ideal-gas molar volume (L/mol)
pub const MOLAR_VOLUME: f64 = 22.4;

/// Offset between Celsius and Kelvin
pub const KELVIN_OFFSET: f64 = 273.15;

pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Electrons transferred per H2 molecule
pub const ELECTRONS_PER_H2: f64 = 2.0;

// Loss model coefficients. These are fixed empirical placeholders and are
// applied identically to every chemistry.

/// Activation loss: `A * ln(j + 1)`
pub const ACTIVATION_COEFFICIENT: f64 = 0.05;

/// Ohmic loss: area-specific resistance (Ω·cm²)
pub const OHMIC_RESISTANCE: f64 = 0.02;

/// Concentration loss: `C * exp(j / J_REF)`
pub const CONCENTRATION_COEFFICIENT: f64 = 0.05;

/// Reference current density for the concentration loss (A/cm²)
pub const CONCENTRATION_REFERENCE_DENSITY: f64 = 0.5;
