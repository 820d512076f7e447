//! `fcc pem` command - PEM stack sizing

use miette::Result;
use std::path::PathBuf;

use crate::cli::args::InputArgs;
use crate::cli::helpers::{resolve_format, resolve_precision, write_output};
use crate::cli::output::{pem_quantities, render_report, CalcDocument, Quantity, Section};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::validation::{
    validate_fuel_cell_inputs, validate_pem_inputs, InputErrors, InvalidInputError,
};
use crate::core::Config;
use crate::entities::{compute_core, compute_pem};

#[derive(clap::Args, Debug)]
pub struct PemArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Stack power to size for in W (default: total power of the scenario)
    #[arg(long, short = 'p')]
    pub stack_power: Option<f64>,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: PemArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let scenario = args.input.load()?;
    let strict = args.input.strict || config.strict();

    let fuel_cell_type = scenario.fuel_cell.fuel_cell_type;
    if !fuel_cell_type.has_geometry_model() {
        log::warn!(
            "{} fuel cells have no stack geometry model; sizing with PEM layer rules anyway",
            fuel_cell_type
        );
    }
    let inputs = scenario.pem.clone().unwrap_or_default();

    if strict {
        let mut errors = InputErrors::default();
        if let Err(e) = validate_pem_inputs(&inputs) {
            errors.extend(e);
        }
        match args.stack_power {
            Some(power) if !power.is_finite() => errors.push(InvalidInputError::NotFinite {
                field: "stack_power",
                value: power,
            }),
            Some(_) => {}
            None => {
                if let Err(e) = validate_fuel_cell_inputs(&scenario.fuel_cell) {
                    errors.extend(e);
                }
            }
        }
        errors.into_result()?;
    }

    // Only run the electrochemical core when the power is not given
    let (core, stack_power) = match args.stack_power {
        Some(power) => (None, power),
        None => {
            let results = compute_core(&scenario.fuel_cell);
            (Some(results), results.total_power)
        }
    };
    let pem = compute_pem(&inputs, stack_power);

    let format = resolve_format(global, &config, OutputFormat::Auto);
    let precision = resolve_precision(global, &config);

    let mut quantities = vec![Quantity::new("stack_power", "Stack power", stack_power, "W")];
    quantities.extend(pem_quantities(&pem));
    let sections = [Section {
        key: "pem",
        name: "PEM Stack",
        quantities,
    }];

    let mut document = CalcDocument::new(&scenario);
    document.stack_power = Some(stack_power);
    document.results = core.as_ref();
    document.pem = Some(&pem);

    let content = render_report(&scenario, &sections, None, &document, format, precision)?;
    write_output(&content, args.output)
}
