//! Core module - constants, gas compositions, validation and configuration

pub mod composition;
pub mod config;
pub mod constants;
pub mod validation;

pub use composition::{CompositionParseError, GasComposition};
pub use config::{Config, ConfigError};
pub use validation::{validate_fuel_cell_inputs, validate_pem_inputs, InputErrors, InvalidInputError};
