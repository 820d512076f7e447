//! Rendering of evaluation results in every output format
//!
//! Text and Markdown use tabled tables with labels and display units
//! (efficiencies as percentages). CSV and TSV carry snake_case keys and raw
//! values for spreadsheets. JSON and YAML serialize the result structs as-is.

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{cells_label, format_value};
use crate::cli::OutputFormat;
use crate::entities::curve::peak_power;
use crate::entities::{CalculationResults, ChartDataPoint, FuelCellType, PemResults, Scenario};

/// One displayed result value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    /// Field name in structured output
    pub key: &'static str,
    pub label: &'static str,
    /// Raw value as computed
    pub value: f64,
    pub unit: &'static str,
    /// Ratio shown as a percentage in tables
    pub percent: bool,
}

impl Quantity {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        value: f64,
        unit: &'static str,
    ) -> Self {
        Self {
            key,
            label,
            value,
            unit,
            percent: false,
        }
    }

    const fn ratio(key: &'static str, label: &'static str, value: f64) -> Self {
        Self {
            key,
            label,
            value,
            unit: "ratio",
            percent: true,
        }
    }

    fn display_value(&self, precision: usize) -> String {
        if self.percent {
            format_value(self.value * 100.0, precision)
        } else {
            format_value(self.value, precision)
        }
    }

    fn display_unit(&self) -> &'static str {
        if self.percent {
            "%"
        } else {
            self.unit
        }
    }
}

pub fn core_quantities(results: &CalculationResults) -> Vec<Quantity> {
    vec![
        Quantity::new("current_density", "Current density", results.current_density, "A/cm²"),
        Quantity::new("power_density", "Power density", results.power_density, "W/cm²"),
        Quantity::ratio(
            "electrical_efficiency",
            "Electrical efficiency",
            results.electrical_efficiency,
        ),
        Quantity::ratio("fuel_utilization", "Fuel utilization", results.fuel_utilization),
        Quantity::new("activation_loss", "Activation loss", results.activation_loss, "V"),
        Quantity::new("ohmic_loss", "Ohmic loss", results.ohmic_loss, "V"),
        Quantity::new(
            "concentration_loss",
            "Concentration loss",
            results.concentration_loss,
            "V",
        ),
        Quantity::new("nernst_voltage", "Nernst voltage", results.nernst_voltage, "V"),
        Quantity::new("total_power", "Total power", results.total_power, "W"),
    ]
}

pub fn pem_quantities(pem: &PemResults) -> Vec<Quantity> {
    vec![
        Quantity::new(
            "metal_stack_height",
            "Metal stack height",
            pem.metal_stack_height,
            "mm",
        ),
        Quantity::new(
            "carbon_stack_height",
            "Carbon stack height",
            pem.carbon_stack_height,
            "mm",
        ),
        Quantity::new("stack_base_area", "Stack base area", pem.stack_base_area, "cm²"),
        Quantity::new(
            "metal_stack_volume",
            "Metal stack volume",
            pem.metal_stack_volume,
            "L",
        ),
        Quantity::new(
            "carbon_stack_volume",
            "Carbon stack volume",
            pem.carbon_stack_volume,
            "L",
        ),
        Quantity::new(
            "metal_stack_power_density",
            "Metal stack power density",
            pem.metal_stack_power_density,
            "kW/L",
        ),
        Quantity::new(
            "carbon_stack_power_density",
            "Carbon stack power density",
            pem.carbon_stack_power_density,
            "kW/L",
        ),
    ]
}

/// A titled group of quantities
pub struct Section {
    /// Section name in delimited output
    pub key: &'static str,
    pub name: &'static str,
    pub quantities: Vec<Quantity>,
}

/// Structured document for JSON/YAML output of `fcc calc` and `fcc pem`
#[derive(Debug, Serialize)]
pub struct CalcDocument<'a> {
    pub title: &'a str,
    pub fuel_cell_type: FuelCellType,
    pub number_of_cells: u32,

    /// W, when sizing a stack for a given power
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_power: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<&'a CalculationResults>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pem: Option<&'a PemResults>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<&'a [ChartDataPoint]>,
}

impl<'a> CalcDocument<'a> {
    pub fn new(scenario: &'a Scenario) -> Self {
        Self {
            title: &scenario.title,
            fuel_cell_type: scenario.fuel_cell.fuel_cell_type,
            number_of_cells: scenario.fuel_cell.number_of_cells,
            stack_power: None,
            results: None,
            pem: None,
            curve: None,
        }
    }
}

/// Render sections plus an optional curve in `format`
///
/// `Auto` renders text tables. Callers choose their own default before this.
pub fn render_report(
    scenario: &Scenario,
    sections: &[Section],
    curve: Option<&[ChartDataPoint]>,
    document: &CalcDocument<'_>,
    format: OutputFormat,
    precision: usize,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(document),
        OutputFormat::Yaml => to_yaml(document),
        OutputFormat::Csv => quantities_delimited(sections, b','),
        OutputFormat::Tsv => quantities_delimited(sections, b'\t'),
        OutputFormat::Md => Ok(render_tables(scenario, sections, curve, precision, true)),
        OutputFormat::Auto => Ok(render_tables(scenario, sections, curve, precision, false)),
    }
}

/// Render the curve alone in `format`; `Auto` means CSV
pub fn render_curve(
    curve: &[ChartDataPoint],
    format: OutputFormat,
    precision: usize,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&curve),
        OutputFormat::Yaml => to_yaml(&curve),
        OutputFormat::Tsv => curve_delimited(curve, b'\t'),
        OutputFormat::Md => Ok(curve_table(curve, precision, true)),
        OutputFormat::Csv | OutputFormat::Auto => curve_delimited(curve, b','),
    }
}

fn render_tables(
    scenario: &Scenario,
    sections: &[Section],
    curve: Option<&[ChartDataPoint]>,
    precision: usize,
    markdown: bool,
) -> String {
    let mut output = String::new();
    let subtitle = format!(
        "{}, {}",
        scenario.fuel_cell.fuel_cell_type,
        cells_label(scenario.fuel_cell.number_of_cells)
    );

    if markdown {
        output.push_str(&format!("# {}\n\n_{}_\n\n", scenario.title, subtitle));
    } else {
        output.push_str(&format!(
            "{} {}\n\n",
            style(&scenario.title).bold(),
            style(format!("({})", subtitle)).dim()
        ));
    }

    for section in sections {
        push_heading(&mut output, section.name, markdown);
        output.push_str(&quantity_table(&section.quantities, precision, markdown));
        output.push_str("\n\n");
    }

    if let Some(curve) = curve {
        push_heading(&mut output, "Performance Curve", markdown);
        output.push_str(&curve_table(curve, precision, markdown));
        output.push('\n');

        if let Some(peak) = peak_power(curve) {
            output.push_str(&format!(
                "\nPeak power {} W at {} V\n",
                format_value(peak.power, precision),
                format_value(peak.voltage, precision)
            ));
        }
    }

    output
}

fn push_heading(output: &mut String, name: &str, markdown: bool) {
    if markdown {
        output.push_str(&format!("## {}\n\n", name));
    } else {
        output.push_str(&format!("{}\n", style(name).bold().underlined()));
    }
}

/// Quantity / value / unit table
pub fn quantity_table(quantities: &[Quantity], precision: usize, markdown: bool) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Quantity", "Value", "Unit"]);

    for q in quantities {
        builder.push_record([
            q.label.to_string(),
            q.display_value(precision),
            q.display_unit().to_string(),
        ]);
    }

    let mut table = builder.build();
    if markdown {
        table.with(Style::markdown());
    } else {
        table.with(Style::rounded());
    }
    table.to_string()
}

/// Voltage / current / power table
pub fn curve_table(curve: &[ChartDataPoint], precision: usize, markdown: bool) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Voltage (V)", "Current (A)", "Power (W)"]);

    for point in curve {
        builder.push_record([
            format_value(point.voltage, precision),
            format_value(point.current, precision),
            format_value(point.power, precision),
        ]);
    }

    let mut table = builder.build();
    if markdown {
        table.with(Style::markdown());
    } else {
        table.with(Style::rounded());
    }
    table.to_string()
}

fn quantities_delimited(sections: &[Section], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer
        .write_record(["section", "quantity", "value", "unit"])
        .into_diagnostic()?;

    for section in sections {
        for q in &section.quantities {
            writer
                .write_record([section.key, q.key, q.value.to_string().as_str(), q.unit])
                .into_diagnostic()?;
        }
    }

    finish_delimited(writer)
}

fn curve_delimited(curve: &[ChartDataPoint], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer
        .write_record(["voltage", "current", "power"])
        .into_diagnostic()?;

    for point in curve {
        writer
            .write_record([
                point.voltage.to_string(),
                point.current.to_string(),
                point.power.to_string(),
            ])
            .into_diagnostic()?;
    }

    finish_delimited(writer)
}

fn finish_delimited(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| miette::miette!("failed to flush delimited output: {}", e))?;
    String::from_utf8(bytes).into_diagnostic()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).into_diagnostic()?;
    json.push('\n');
    Ok(json)
}

fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_yml::to_string(value).into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Scenario;

    fn baseline() -> (Scenario, crate::entities::Evaluation) {
        let scenario = Scenario::new("Baseline");
        let eval = scenario.evaluate();
        (scenario, eval)
    }

    #[test]
    fn test_percent_display() {
        let (_, eval) = baseline();
        let quantities = core_quantities(&eval.results);
        let efficiency = quantities
            .iter()
            .find(|q| q.key == "electrical_efficiency")
            .unwrap();

        assert_eq!(efficiency.display_unit(), "%");
        assert_eq!(efficiency.display_value(2), "56.91");
    }

    #[test]
    fn test_csv_report_uses_raw_values() {
        let (scenario, eval) = baseline();
        let sections = [Section {
            key: "results",
            name: "Performance",
            quantities: core_quantities(&eval.results),
        }];
        let doc = CalcDocument::new(&scenario);
        let csv = render_report(&scenario, &sections, None, &doc, OutputFormat::Csv, 4).unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("section,quantity,value,unit"));
        assert!(csv.contains("results,total_power,"));
        assert!(csv.contains("results,current_density,0.1,A/cm²"));
    }

    #[test]
    fn test_json_turns_non_finite_into_null() {
        let mut scenario = Scenario::new("Zero area");
        scenario.fuel_cell.active_area = 0.0;
        let eval = scenario.evaluate();

        let mut doc = CalcDocument::new(&scenario);
        doc.results = Some(&eval.results);
        let json = render_report(&scenario, &[], None, &doc, OutputFormat::Json, 4).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["results"]["current_density"].is_null());
        assert!(value["results"]["nernst_voltage"].is_number());
    }

    #[test]
    fn test_curve_csv_has_header_and_every_sample() {
        let (_, eval) = baseline();
        let csv = render_curve(&eval.curve, OutputFormat::Auto, 4).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "voltage,current,power");
        assert_eq!(lines.len(), crate::entities::CURVE_SAMPLES + 1);
        assert!(lines[1].starts_with("0,"));
    }

    #[test]
    fn test_text_tables_show_non_finite_markers() {
        let mut scenario = Scenario::new("Zero area");
        scenario.fuel_cell.active_area = 0.0;
        let eval = scenario.evaluate();
        let sections = [Section {
            key: "results",
            name: "Performance",
            quantities: core_quantities(&eval.results),
        }];
        let doc = CalcDocument::new(&scenario);
        let text = render_report(&scenario, &sections, None, &doc, OutputFormat::Md, 4).unwrap();

        assert!(text.starts_with("# Zero area"));
        assert!(text.contains("## Performance"));
        assert!(text.contains("| Current density"));
        assert!(text.contains("inf"));
        assert!(text.contains("NaN"));
    }
}
