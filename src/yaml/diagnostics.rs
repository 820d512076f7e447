//! Scenario file diagnostics with source locations

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Scenario YAML that failed to parse or did not match the scenario layout
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(fcc::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl YamlSyntaxError {
    /// Build from a serde_yml error, pointing at its reported location
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let offset = err
            .location()
            .map(|loc| line_col_to_offset(source, loc.line(), loc.column()))
            .unwrap_or(0);
        let message = err.to_string();

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help: generate_help(&message),
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure loading a scenario file
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("cannot read {}", path.display())]
    #[diagnostic(code(fcc::yaml::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Byte offset of a 1-based line/column, clamped to the source length
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;

    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let within = text
                .char_indices()
                .nth(column.saturating_sub(1))
                .map(|(i, _)| i)
                .unwrap_or(text.len());
            return offset + within;
        }
        offset += text.len();
    }

    source.len().saturating_sub(1)
}

/// Suggest a fix based on the parser's message
fn generate_help(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("unknown field") {
        return Some(
            "Field names are snake_case (active_area, anode_composition, ...). Run `fcc new` to see a complete scenario."
                .to_string(),
        );
    }

    if msg.contains("unknown variant") {
        return Some("fuel_cell_type must be one of PEM, SOFC, AFC, MCFC, PAFC".to_string());
    }

    if msg.contains("invalid type") && msg.contains("expected f64") {
        return Some("Numeric fields take plain numbers without quotes or units: active_area: 100".to_string());
    }

    if (msg.contains("invalid type") && msg.contains("expected u32")) || msg.contains("invalid value") {
        return Some("number_of_cells must be a whole number of at least 1".to_string());
    }

    if msg.contains("tab") {
        return Some(
            "YAML requires spaces for indentation, not tabs. Replace tabs with spaces.".to_string(),
        );
    }

    if msg.contains("duplicate") {
        return Some("Each key can only appear once. Remove or rename the duplicate key.".to_string());
    }

    if msg.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation.".to_string());
    }

    None
}
