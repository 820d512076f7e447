//! `fcc validate` command - Check scenario files

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::entities::Scenario;
use crate::yaml::parse_yaml_file;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Scenario files to check
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Only check that files parse; skip the input checks
    #[arg(long)]
    pub syntax_only: bool,

    /// Show summary only, don't show individual errors
    #[arg(long)]
    pub summary: bool,
}

#[derive(Default)]
struct ValidationStats {
    files_checked: usize,
    files_passed: usize,
    files_failed: usize,
    total_errors: usize,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let mut stats = ValidationStats::default();

    for path in &args.paths {
        stats.files_checked += 1;

        let scenario = match parse_yaml_file::<Scenario>(path) {
            Ok(scenario) => scenario,
            Err(e) => {
                stats.files_failed += 1;
                stats.total_errors += 1;

                if !args.summary {
                    println!("{} {} - not a valid scenario", style("✗").red(), path.display());
                    println!("{:?}", miette::Report::new(e));
                }
                continue;
            }
        };

        let checked = if args.syntax_only {
            Ok(())
        } else {
            scenario.validate()
        };

        match checked {
            Ok(()) => {
                stats.files_passed += 1;
                if !args.summary {
                    println!(
                        "{} {} ({}, {})",
                        style("✓").green(),
                        path.display(),
                        scenario.fuel_cell.fuel_cell_type,
                        crate::cli::helpers::cells_label(scenario.fuel_cell.number_of_cells)
                    );
                }
            }
            Err(e) => {
                stats.files_failed += 1;
                stats.total_errors += e.len();

                if !args.summary {
                    println!(
                        "{} {} - {} error(s)",
                        style("✗").red(),
                        path.display(),
                        e.len()
                    );
                    println!("{:?}", miette::Report::new(e));
                }
            }
        }
    }

    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Validation Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Files checked:  {}", style(stats.files_checked).cyan());
    println!("  Files passed:   {}", style(stats.files_passed).green());
    println!("  Files failed:   {}", style(stats.files_failed).red());
    println!("  Total errors:   {}", style(stats.total_errors).red());
    println!();

    match stats.files_failed {
        0 => {
            println!("{} All scenarios passed validation!", style("✓").green().bold());
            Ok(())
        }
        1 => Err(miette::miette!("Validation failed: 1 file has errors")),
        n => Err(miette::miette!("Validation failed: {} files have errors", n)),
    }
}
