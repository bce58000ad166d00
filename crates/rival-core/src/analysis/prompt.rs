//! Prompt construction.
//!
//! Renders the fixed analyst template with the product fields, the
//! competitor list as a JSON blob, and formatting instructions generated
//! from the `AnalysisOutput` schema.

use serde_json::Value;
use tera::{Context, Tera};

use super::model::AnalysisOutput;
use super::render::format_number;
use crate::product::model::{CompetitorSnapshot, ProductRecord};
use crate::product::ProductContext;

/// Marker for absent product values.
const NULL_MARKER: &str = "null";

/// Marketplace domain assumed when the product has none.
pub const DEFAULT_DOMAIN: &str = "com";

const TEMPLATE_NAME: &str = "analysis.txt";

const ANALYSIS_TEMPLATE: &str = "You are a market analyst. Given a product and its competitor list, \
write a concise analysis. Pay attention to currency and pricing context.

Product Title: {{ product_title }}
Brand: {{ brand }}
Price: {{ currency }} {{ price }}
Rating: {{ rating }}
Categories: {{ categories }}
Amazon Domain: {{ amazon_domain }}

Competitors (JSON): {{ competitors }}

IMPORTANT: All prices should be displayed with their correct currency symbol. \
When comparing prices, ensure you're using the same currency context.

{{ format_instructions }}";

/// Renders analysis prompts. Build once, reuse for every request.
pub struct PromptBuilder {
    tera: Tera,
    format_instructions: String,
}

impl PromptBuilder {
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, ANALYSIS_TEMPLATE)?;
        let format_instructions =
            format_instructions().map_err(|e| tera::Error::msg(format!("Schema error: {}", e)))?;
        Ok(Self {
            tera,
            format_instructions,
        })
    }

    /// Instructions describing the required output shape.
    pub fn format_instructions(&self) -> &str {
        &self.format_instructions
    }

    /// Render the prompt for `asin`. A missing product falls back to
    /// placeholders, with the ASIN standing in for the title.
    pub fn build(&self, asin: &str, ctx: &ProductContext) -> tera::Result<String> {
        let product = ctx.product.as_ref();
        let competitors: Vec<CompetitorSnapshot> =
            ctx.competitors.iter().map(CompetitorSnapshot::from).collect();
        let competitors_json = serde_json::to_string(&competitors)
            .map_err(|e| tera::Error::msg(format!("Failed to serialize competitors: {}", e)))?;

        let mut context = Context::new();
        context.insert("product_title", &product_title(asin, product));
        context.insert("brand", &text_or_null(product.and_then(|p| p.brand.as_deref())));
        context.insert("price", &number_or_null(product.and_then(|p| p.price)));
        context.insert(
            "currency",
            product.and_then(|p| p.currency.as_deref()).unwrap_or_default(),
        );
        context.insert("rating", &number_or_null(product.and_then(|p| p.rating)));
        context.insert("categories", &categories(product));
        context.insert(
            "amazon_domain",
            product
                .and_then(|p| p.amazon_domain.as_deref())
                .unwrap_or(DEFAULT_DOMAIN),
        );
        context.insert("competitors", &competitors_json);
        context.insert("format_instructions", &self.format_instructions);

        self.tera.render(TEMPLATE_NAME, &context)
    }
}

/// JSON Schema of `AnalysisOutput` wrapped in instructions for the model.
pub fn format_instructions() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AnalysisOutput);
    let mut value = serde_json::to_value(&schema)?;
    // The schema metadata is noise to the model.
    if let Value::Object(ref mut map) = value {
        map.remove("$schema");
        map.remove("title");
    }
    let schema_json = serde_json::to_string(&value)?;

    Ok(format!(
        "The output should be formatted as a JSON instance that conforms to the JSON schema below.\n\
         Return only the JSON object. Use exactly these field names and types; \
         use null for unknown values and [] for empty lists.\n\n\
         Here is the output schema:\n```\n{}\n```",
        schema_json
    ))
}

fn product_title(asin: &str, product: Option<&ProductRecord>) -> String {
    product
        .and_then(|p| p.title.clone())
        .unwrap_or_else(|| asin.to_string())
}

fn text_or_null(value: Option<&str>) -> String {
    value.unwrap_or(NULL_MARKER).to_string()
}

fn number_or_null(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| NULL_MARKER.to_string())
}

fn categories(product: Option<&ProductRecord>) -> String {
    product
        .and_then(|p| p.categories.as_ref())
        .and_then(|c| serde_json::to_string(c).ok())
        .unwrap_or_else(|| NULL_MARKER.to_string())
}
