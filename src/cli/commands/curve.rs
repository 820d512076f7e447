//! `fcc curve` command - Sample the performance curve

use miette::Result;
use std::path::PathBuf;

use crate::cli::args::InputArgs;
use crate::cli::commands::evaluate;
use crate::cli::helpers::{resolve_format, resolve_precision, write_output};
use crate::cli::output::render_curve;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct CurveArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: CurveArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let scenario = args.input.load()?;
    let evaluation = evaluate(&scenario, args.input.strict || config.strict())?;

    let format = resolve_format(global, &config, OutputFormat::Csv);
    let precision = resolve_precision(global, &config);

    let content = render_curve(&evaluation.curve, format, precision)?;
    write_output(&content, args.output)
}
