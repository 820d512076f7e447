//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    calc::CalcArgs, completions::CompletionsArgs, config::ConfigCommands, curve::CurveArgs,
    new::NewArgs, pem::PemArgs, validate::ValidateArgs,
};
use crate::core::composition::GasComposition;
use crate::entities::fuel_cell::FuelCellType;
use crate::entities::{PemInputs, Scenario};

#[derive(Parser)]
#[command(name = "fcc")]
#[command(author, version, about = "Fuel Cell Calculator")]
#[command(long_about = "Fuel Cell Calculator - steady-state fuel cell performance: current and power density, efficiencies, overpotential losses, Nernst voltage, PEM stack sizing and polarization curves.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress warnings
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Decimal places for text output (default: config, then 4)
    #[arg(long, global = true)]
    pub precision: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a scenario: core results, PEM stack sizing and performance curve
    Calc(CalcArgs),

    /// Sample the voltage/current/power curve
    Curve(CurveArgs),

    /// Size a PEM stack for a given stack power
    Pem(PemArgs),

    /// Write a starter scenario file
    New(NewArgs),

    /// Check scenario files for syntax errors and degenerate inputs
    Validate(ValidateArgs),

    /// View and edit configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically pick per command (tables for calc/pem, csv for curve)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// JSON format (non-finite numbers become null)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Tab-separated values (for piping)
    Tsv,
    /// Markdown tables
    Md,
}

/// Scenario source plus per-field overrides, shared by the evaluating commands
#[derive(clap::Args, Clone, Debug, Default)]
pub struct InputArgs {
    /// Scenario file (default: built-in operating point)
    pub scenario: Option<PathBuf>,

    /// Cell voltage (V)
    #[arg(long)]
    pub voltage: Option<f64>,

    /// Cell current (A)
    #[arg(long)]
    pub current: Option<f64>,

    /// Active area (cm²), applied to the cell and the PEM stack
    #[arg(long = "area")]
    pub active_area: Option<f64>,

    /// Operating temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    /// Anode pressure (atm)
    #[arg(long)]
    pub anode_pressure: Option<f64>,

    /// Cathode pressure (atm)
    #[arg(long)]
    pub cathode_pressure: Option<f64>,

    /// Anode flow (L/min)
    #[arg(long)]
    pub anode_flow: Option<f64>,

    /// Cathode flow (L/min)
    #[arg(long)]
    pub cathode_flow: Option<f64>,

    /// Number of cells, applied to the cell and the PEM stack
    #[arg(long = "cells")]
    pub number_of_cells: Option<u32>,

    /// Fuel cell type
    #[arg(long = "type", value_enum, ignore_case = true)]
    pub fuel_cell_type: Option<FuelCellType>,

    /// Anode composition entries to set, e.g. H2=75,CO2=25
    #[arg(long)]
    pub anode: Option<GasComposition>,

    /// Cathode composition entries to set, e.g. O2=100,N2=0
    #[arg(long)]
    pub cathode: Option<GasComposition>,

    /// Reject degenerate inputs instead of reporting non-finite results
    #[arg(long)]
    pub strict: bool,
}

impl InputArgs {
    /// Load the scenario file (or defaults) and apply the overrides
    pub fn load(&self) -> miette::Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => crate::yaml::parse_yaml_file::<Scenario>(path)?,
            None => Scenario::new("Default operating point"),
        };
        self.apply(&mut scenario);
        Ok(scenario)
    }

    /// Apply every given override to `scenario`
    pub fn apply(&self, scenario: &mut Scenario) {
        let fc = &mut scenario.fuel_cell;

        if let Some(v) = self.voltage {
            fc.voltage = v;
        }
        if let Some(v) = self.current {
            fc.current = v;
        }
        if let Some(v) = self.active_area {
            fc.active_area = v;
        }
        if let Some(v) = self.temperature {
            fc.temperature = v;
        }
        if let Some(v) = self.anode_pressure {
            fc.anode_pressure = v;
        }
        if let Some(v) = self.cathode_pressure {
            fc.cathode_pressure = v;
        }
        if let Some(v) = self.anode_flow {
            fc.anode_flow = v;
        }
        if let Some(v) = self.cathode_flow {
            fc.cathode_flow = v;
        }
        if let Some(v) = self.number_of_cells {
            fc.number_of_cells = v;
        }
        if let Some(t) = self.fuel_cell_type {
            fc.fuel_cell_type = t;
        }
        if let Some(ref comp) = self.anode {
            fc.anode_composition.extend_from(comp);
        }
        if let Some(ref comp) = self.cathode {
            fc.cathode_composition.extend_from(comp);
        }

        // Shared fields follow onto the stack build
        if self.active_area.is_some() || self.number_of_cells.is_some() {
            if scenario.fuel_cell.fuel_cell_type.has_geometry_model() || scenario.pem.is_some() {
                let pem = scenario.pem.get_or_insert_with(PemInputs::default);
                if let Some(v) = self.active_area {
                    pem.active_area = v;
                }
                if let Some(v) = self.number_of_cells {
                    pem.number_of_cells = v;
                }
            }
        }
    }
}
