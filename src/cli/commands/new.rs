//! `fcc new` command - Write a starter scenario file

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::core::Config;
use crate::entities::FuelCellType;
use crate::schema::{TemplateContext, TemplateGenerator};

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// File to create
    #[arg(default_value = "scenario.yaml")]
    pub path: PathBuf,

    /// Scenario title (default: derived from the file name)
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Fuel cell type
    #[arg(long = "type", value_enum, ignore_case = true, default_value = "PEM")]
    pub fuel_cell_type: FuelCellType,

    /// Number of cells
    #[arg(long, default_value_t = 1)]
    pub cells: u32,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: NewArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(miette::miette!(
            help = "pass --force to overwrite it",
            "{} already exists",
            args.path.display()
        ));
    }

    let config = Config::load();
    let filename = args
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scenario.yaml".to_string());
    let title = args.title.clone().unwrap_or_else(|| title_from_filename(&filename));

    let ctx = TemplateContext::new(title, config.author())
        .with_type(args.fuel_cell_type)
        .with_cells(args.cells)
        .with_filename(filename);

    let generator = TemplateGenerator::new()?;
    let yaml = generator.generate_scenario(&ctx)?;

    if let Some(parent) = args.path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).into_diagnostic()?;
        }
    }
    fs::write(&args.path, yaml).into_diagnostic()?;

    println!(
        "{} Created {} scenario {}",
        style("✓").green(),
        args.fuel_cell_type,
        style(args.path.display()).cyan()
    );
    println!(
        "   Run {} to evaluate it",
        style(format!("fcc calc {}", args.path.display())).yellow()
    );

    Ok(())
}

/// "hot_stack-2.yaml" -> "Hot stack 2"
fn title_from_filename(filename: &str) -> String {
    let stem = filename
        .split('.')
        .next()
        .unwrap_or(filename)
        .replace(['_', '-'], " ");
    let stem = stem.trim();

    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Scenario".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_filename() {
        assert_eq!(title_from_filename("hot_stack-2.yaml"), "Hot stack 2");
        assert_eq!(title_from_filename("baseline.yaml"), "Baseline");
        assert_eq!(title_from_filename(".yaml"), "Scenario");
    }
}
