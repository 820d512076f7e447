//! Shared helper functions for CLI commands
//!
//! Output format and precision resolution, number formatting, and writing
//! rendered output to stdout or a file.

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

/// Format a number for display with a fixed number of decimals
///
/// Non-finite values print as `inf`, `-inf` or `NaN` so degenerate inputs
/// stay visible instead of turning into a misleading number.
pub fn format_value(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{:.*}", precision, value)
    }
}

/// Pick the output format: `--format`, then config `default_format`, then the command's own default
pub fn resolve_format(global: &GlobalOpts, config: &Config, auto: OutputFormat) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }

    let configured = config.default_format.as_deref().and_then(|name| {
        match <OutputFormat as ValueEnum>::from_str(name, true) {
            Ok(format) => Some(format),
            Err(_) => {
                log::warn!("ignoring unknown default_format '{}' in config", name);
                None
            }
        }
    });

    match configured {
        Some(format) if format != OutputFormat::Auto => format,
        _ => auto,
    }
}

/// Decimal places for text output: `--precision`, then config, then the built-in default
pub fn resolve_precision(global: &GlobalOpts, config: &Config) -> usize {
    global.precision.unwrap_or_else(|| config.precision())
}

/// "1 cell" / "12 cells"
pub fn cells_label(count: u32) -> String {
    if count == 1 {
        "1 cell".to_string()
    } else {
        format!("{} cells", count)
    }
}

pub(crate) fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            eprintln!(
                "{} Output written to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
