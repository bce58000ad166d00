//! Analysis domain models.
//!
//! `AnalysisOutput` is the contract the model response must satisfy. Doc
//! comments on its fields end up in the JSON Schema embedded in the prompt.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Model-generated summary of one competitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompetitorInsight {
    /// ASIN of the competitor; empty string when unknown.
    pub asin: String,
    /// Competitor product title.
    pub title: Option<String>,
    /// Listed price, in `currency`.
    pub price: Option<f64>,
    /// ISO currency code of the price, e.g. "USD".
    pub currency: Option<String>,
    /// Average customer rating.
    pub rating: Option<f64>,
    /// Short observations about this competitor, most important first.
    #[serde(default)]
    pub key_points: Vec<String>,
}

/// Structured competitor analysis of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisOutput {
    /// Concise overview of the product and its competitive landscape.
    pub summary: String,
    /// How the product is positioned against its competitors.
    pub positioning: String,
    /// Competitors ranked by relevance.
    #[serde(default)]
    pub top_competitors: Vec<CompetitorInsight>,
    /// Actionable recommendations for the product.
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Successful result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub asin: String,
    pub model: String,
    /// Number of competitor records sent to the model.
    pub competitors_considered: usize,
    pub output: AnalysisOutput,
    /// Rendered plain-text report.
    pub text: String,
}
