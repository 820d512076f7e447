//! Template generation for new scenario files

use chrono::{DateTime, Utc};
use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

use crate::entities::fuel_cell::FuelCellType;
use crate::entities::Scenario;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const SCENARIO_TEMPLATE: &str = "scenario.yaml.tera";

/// Context for template generation
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub title: String,
    pub author: String,
    pub created: DateTime<Utc>,
    pub fuel_cell_type: FuelCellType,
    pub number_of_cells: u32,
    /// File name shown in the usage comment
    pub filename: String,
}

impl TemplateContext {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            created: Utc::now(),
            fuel_cell_type: FuelCellType::Pem,
            number_of_cells: 1,
            filename: "scenario.yaml".to_string(),
        }
    }

    pub fn with_type(mut self, fuel_cell_type: FuelCellType) -> Self {
        self.fuel_cell_type = fuel_cell_type;
        self
    }

    pub fn with_cells(mut self, number_of_cells: u32) -> Self {
        self.number_of_cells = number_of_cells;
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }
}

/// Template generator using Tera
pub struct TemplateGenerator {
    tera: Tera,
}

#[derive(Debug, Error, miette::Diagnostic)]
pub enum TemplateError {
    #[error("Template rendering error: {0}")]
    #[diagnostic(code(fcc::template::render))]
    RenderError(String),

    #[error("Template serialization error: {0}")]
    #[diagnostic(code(fcc::template::serialize))]
    SerializeError(String),
}

impl TemplateGenerator {
    /// Create a new template generator with embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Generate a commented starter scenario
    pub fn generate_scenario(&self, ctx: &TemplateContext) -> Result<String, TemplateError> {
        let mut context = tera::Context::new();
        // JSON strings are valid YAML scalars and survive quotes/colons in titles
        context.insert("title", &quote(&ctx.title)?);
        context.insert("author", &quote(&ctx.author)?);
        context.insert("created", &ctx.created.to_rfc3339());
        context.insert("fuel_cell_type", &ctx.fuel_cell_type.to_string());
        context.insert("number_of_cells", &ctx.number_of_cells);
        context.insert("include_pem", &ctx.fuel_cell_type.has_geometry_model());
        context.insert("filename", &ctx.filename);

        if self
            .tera
            .get_template_names()
            .any(|n| n == SCENARIO_TEMPLATE)
        {
            self.tera
                .render(SCENARIO_TEMPLATE, &context)
                .map_err(|e| TemplateError::RenderError(e.to_string()))
        } else {
            self.plain_scenario(ctx)
        }
    }

    /// Uncommented fallback when the embedded template is unavailable
    fn plain_scenario(&self, ctx: &TemplateContext) -> Result<String, TemplateError> {
        let mut scenario = Scenario::new(ctx.title.clone());
        scenario.author = Some(ctx.author.clone());
        scenario.created = Some(ctx.created);
        scenario.fuel_cell.fuel_cell_type = ctx.fuel_cell_type;
        scenario.fuel_cell.number_of_cells = ctx.number_of_cells;
        if ctx.fuel_cell_type.has_geometry_model() {
            scenario.pem = Some(crate::entities::PemInputs {
                number_of_cells: ctx.number_of_cells,
                ..Default::default()
            });
        }

        serde_yml::to_string(&scenario).map_err(|e| TemplateError::SerializeError(e.to_string()))
    }
}

fn quote(s: &str) -> Result<String, TemplateError> {
    serde_json::to_string(s).map_err(|e| TemplateError::SerializeError(e.to_string()))
}
