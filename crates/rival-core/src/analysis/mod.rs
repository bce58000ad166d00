//! Competitor analysis pipeline.
//!
//! One linear pass per call: check credentials, fetch the product and its
//! competitors, render the prompt, call the model, decode the structured
//! output and render the report. Any failure short-circuits into an
//! `AnalysisFailure`; nothing is retried.

pub mod model;
pub mod parser;
pub mod prompt;
pub mod render;

use std::sync::Arc;

use tracing::{debug, info, warn};

pub use model::{AnalysisOutput, AnalysisReport, CompetitorInsight};

use crate::config::AnalystConfig;
use crate::error::{AnalysisError, AnalysisFailure};
use crate::llm::{CompletionClient, CompletionRequest, OpenAiClient};
use crate::product::{self, ProductContext, ProductStore};
use prompt::PromptBuilder;

/// Entry point for running analyses.
pub struct Analyst {
    config: AnalystConfig,
    store: Arc<dyn ProductStore>,
    client: Arc<dyn CompletionClient>,
}

impl Analyst {
    pub fn new(
        config: AnalystConfig,
        store: Arc<dyn ProductStore>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            config,
            store,
            client,
        }
    }

    /// Analyst backed by the OpenAI-compatible client described by `config`.
    pub fn with_openai(config: AnalystConfig, store: Arc<dyn ProductStore>) -> Self {
        let client = OpenAiClient::new(
            config.api_key.as_deref().unwrap_or_default(),
            &config.api_base,
            config.timeout,
        );
        Self::new(config, store, Arc::new(client))
    }

    pub fn config(&self) -> &AnalystConfig {
        &self.config
    }

    /// Run the full pipeline for one product.
    pub async fn analyze(&self, asin: &str) -> Result<AnalysisReport, AnalysisFailure> {
        self.run(asin).await.map_err(|err| {
            let failure = AnalysisFailure::from(err);
            warn!(asin, kind = ?failure.kind, error = %failure.message, "Analysis failed");
            failure
        })
    }

    /// Run the pipeline and return either the report or a short error string.
    pub async fn analyze_to_text(&self, asin: &str) -> String {
        match self.analyze(asin).await {
            Ok(report) => report.text,
            Err(failure) => failure.to_text(),
        }
    }

    /// Fetch and render the prompt without calling the model.
    pub async fn prepare_prompt(&self, asin: &str) -> Result<String, AnalysisFailure> {
        self.prepare(asin)
            .await
            .map(|(_, prompt)| prompt)
            .map_err(AnalysisFailure::from)
    }

    async fn run(&self, asin: &str) -> Result<AnalysisReport, AnalysisError> {
        if self.config.api_key.is_none() {
            return Err(AnalysisError::MissingApiKey);
        }

        let (ctx, prompt) = self.prepare(asin).await?;

        let request = CompletionRequest::deterministic(self.config.model.as_str(), prompt);
        info!(asin, model = %request.model, competitors = ctx.competitors.len(), "Requesting analysis");
        let raw = self.client.complete(&request).await?;

        let output = parser::parse_output(&raw).map_err(AnalysisError::Decode)?;
        debug!(
            insights = output.top_competitors.len(),
            recommendations = output.recommendations.len(),
            "Decoded analysis"
        );

        let text = render::render_report(&output);
        Ok(AnalysisReport {
            asin: asin.to_string(),
            model: request.model,
            competitors_considered: ctx.competitors.len(),
            output,
            text,
        })
    }

    async fn prepare(&self, asin: &str) -> Result<(ProductContext, String), AnalysisError> {
        let ctx = product::fetch_context(self.store.as_ref(), asin).await?;
        let builder = PromptBuilder::new()?;
        let prompt = builder.build(asin, &ctx)?;
        debug!(asin, prompt_len = prompt.len(), "Rendered prompt");
        Ok((ctx, prompt))
    }
}
