//! `fcc calc` command - Evaluate a scenario end to end

use miette::Result;
use std::path::PathBuf;

use crate::cli::args::InputArgs;
use crate::cli::commands::evaluate;
use crate::cli::helpers::{resolve_format, resolve_precision, write_output};
use crate::cli::output::{core_quantities, pem_quantities, render_report, CalcDocument, Section};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct CalcArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Leave the performance curve out of the report
    #[arg(long)]
    pub no_curve: bool,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: CalcArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let scenario = args.input.load()?;
    let evaluation = evaluate(&scenario, args.input.strict || config.strict())?;

    let format = resolve_format(global, &config, OutputFormat::Auto);
    let precision = resolve_precision(global, &config);

    let mut sections = vec![Section {
        key: "results",
        name: "Performance",
        quantities: core_quantities(&evaluation.results),
    }];
    if let Some(ref pem) = evaluation.pem {
        sections.push(Section {
            key: "pem",
            name: "PEM Stack",
            quantities: pem_quantities(pem),
        });
    }

    let curve = (!args.no_curve).then_some(evaluation.curve.as_slice());

    let mut document = CalcDocument::new(&scenario);
    document.results = Some(&evaluation.results);
    document.pem = evaluation.pem.as_ref();
    document.curve = curve;

    let content = render_report(&scenario, &sections, curve, &document, format, precision)?;
    write_output(&content, args.output)
}
