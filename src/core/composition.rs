//! Gas composition maps
//!
//! A composition is an open mapping from gas symbol (`H2`, `O2`, ...) to a
//! percentage. Percentages are taken as given: nothing requires them to sum
//! to 100 and no normalization is ever applied.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const HYDROGEN: &str = "H2";
pub const OXYGEN: &str = "O2";
pub const CARBON_MONOXIDE: &str = "CO";
pub const CARBON_DIOXIDE: &str = "CO2";
pub const METHANE: &str = "CH4";
pub const NITROGEN: &str = "N2";

/// Gas symbol → percentage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GasComposition(BTreeMap<String, f64>);

impl GasComposition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default anode feed: pure hydrogen with the other expected gases at zero
    pub fn default_anode() -> Self {
        [
            (HYDROGEN, 100.0),
            (CARBON_MONOXIDE, 0.0),
            (CARBON_DIOXIDE, 0.0),
            (METHANE, 0.0),
            (NITROGEN, 0.0),
        ]
        .into_iter()
        .collect()
    }

    /// Default cathode feed: air
    pub fn default_cathode() -> Self {
        [(OXYGEN, 21.0), (NITROGEN, 79.0)].into_iter().collect()
    }

    /// Percentage of `gas`, or 0.0 when the gas is not listed
    pub fn get(&self, gas: &str) -> f64 {
        self.0.get(gas).copied().unwrap_or(0.0)
    }

    /// Fraction (0..1 for sane inputs) of `gas`
    pub fn fraction(&self, gas: &str) -> f64 {
        self.get(gas) / 100.0
    }

    pub fn set(&mut self, gas: impl Into<String>, percentage: f64) {
        self.0.insert(gas.into(), percentage);
    }

    /// Overlay every entry of `other` onto this composition
    pub fn extend_from(&mut self, other: &GasComposition) {
        for (gas, pct) in other.iter() {
            self.set(gas, pct);
        }
    }

    /// Sum of all listed percentages
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for GasComposition {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl fmt::Display for GasComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(gas, pct)| format!("{}={}", gas, pct)).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// Error parsing a `GAS=PCT,...` composition string
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompositionParseError {
    #[error("expected GAS=PERCENT, got '{0}'")]
    MissingSeparator(String),

    #[error("empty gas symbol in '{0}'")]
    EmptyGas(String),

    #[error("invalid percentage for {gas}: '{value}'")]
    InvalidPercentage { gas: String, value: String },
}

impl FromStr for GasComposition {
    type Err = CompositionParseError;

    /// Parse `H2=75,CO2=25` (whitespace around entries is ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut composition = GasComposition::new();

        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (gas, value) = entry
                .split_once('=')
                .ok_or_else(|| CompositionParseError::MissingSeparator(entry.to_string()))?;

            let gas = gas.trim();
            if gas.is_empty() {
                return Err(CompositionParseError::EmptyGas(entry.to_string()));
            }

            let pct: f64 = value.trim().parse().map_err(|_| {
                CompositionParseError::InvalidPercentage {
                    gas: gas.to_string(),
                    value: value.trim().to_string(),
                }
            })?;

            composition.set(gas, pct);
        }

        Ok(composition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_gas_defaults_to_zero() {
        let comp = GasComposition::default_cathode();
        assert_eq!(comp.get(OXYGEN), 21.0);
        assert_eq!(comp.get(HYDROGEN), 0.0);
        assert_eq!(comp.fraction(OXYGEN), 0.21);
    }

    #[test]
    fn test_no_normalization() {
        let comp: GasComposition = "H2=60,CO2=60".parse().unwrap();
        assert_eq!(comp.total(), 120.0);
        assert_eq!(comp.get(HYDROGEN), 60.0);
    }

    #[test]
    fn test_parse_with_whitespace() {
        let comp: GasComposition = " H2 = 75 , N2=25 ,".parse().unwrap();
        assert_eq!(comp.len(), 2);
        assert_eq!(comp.get(HYDROGEN), 75.0);
        assert_eq!(comp.get(NITROGEN), 25.0);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "H2".parse::<GasComposition>(),
            Err(CompositionParseError::MissingSeparator("H2".to_string()))
        );
        assert!(matches!(
            "=5".parse::<GasComposition>(),
            Err(CompositionParseError::EmptyGas(_))
        ));
        assert!(matches!(
            "H2=lots".parse::<GasComposition>(),
            Err(CompositionParseError::InvalidPercentage { .. })
        ));
    }

    #[test]
    fn test_extend_overrides_existing() {
        let mut comp = GasComposition::default_anode();
        comp.extend_from(&"H2=70,CO2=30".parse().unwrap());
        assert_eq!(comp.get(HYDROGEN), 70.0);
        assert_eq!(comp.get(CARBON_DIOXIDE), 30.0);
        assert_eq!(comp.get(METHANE), 0.0);
    }

    #[test]
    fn test_yaml_is_plain_mapping() {
        let comp: GasComposition = serde_yml::from_str("H2: 80\nCO: 20\n").unwrap();
        assert_eq!(comp.get(HYDROGEN), 80.0);
        assert_eq!(comp.get("CO"), 20.0);
    }

    #[test]
    fn test_display() {
        let comp = GasComposition::default_cathode();
        assert_eq!(comp.to_string(), "N2=79,O2=21");
    }
}
