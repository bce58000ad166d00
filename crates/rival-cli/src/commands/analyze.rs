//! Competitor analysis command.

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rival_core::error::{AnalysisError, AnalysisFailure};
use rival_core::product::RedisProductStore;
use rival_core::{Analyst, AnalystConfig};
use tracing::info;

use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// ASIN of the product to analyze
    pub asin: String,

    /// Model to use (overrides OPENAI_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Print the prompt without calling the model
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report or failure as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: AnalyzeArgs, config: AnalystConfig, verbose: bool) -> Result<()> {
    let config = match args.model {
        Some(ref model) => config.with_model(model.as_str()),
        None => config,
    };

    // Fail on a missing key before touching the network at all.
    if config.api_key.is_none() && !args.dry_run {
        return fail(AnalysisFailure::from(AnalysisError::MissingApiKey), args.json, verbose);
    }

    let store = match RedisProductStore::connect(&config.redis_url).await {
        Ok(store) => store,
        Err(e) => return fail(AnalysisFailure::from(AnalysisError::from(e)), args.json, verbose),
    };
    let analyst = Analyst::with_openai(config, Arc::new(store));

    if args.dry_run {
        return match analyst.prepare_prompt(&args.asin).await {
            Ok(prompt) => {
                println!("{}", prompt);
                println!("\n{}", "(dry run - model not called)".dimmed());
                Ok(())
            }
            Err(failure) => fail(failure, args.json, verbose),
        };
    }

    info!(asin = %args.asin, model = %analyst.config().model, "Analyzing product");

    match analyst.analyze(&args.asin).await {
        Ok(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.text);
            }
            Ok(())
        }
        Err(failure) => fail(failure, args.json, verbose),
    }
}

/// Report a failure, then return it as an error so the process exits non-zero.
fn fail(failure: AnalysisFailure, json: bool, verbose: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&failure)?);
    } else {
        output::print_failure(&failure, verbose);
        println!("{}", failure.to_text());
    }
    anyhow::bail!("{}", failure.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rival_core::error::ErrorKind;

    #[test]
    fn test_fail_returns_error() {
        let failure = AnalysisFailure::from(AnalysisError::MissingApiKey);
        let err = fail(failure, false, false).unwrap_err();
        assert!(err.to_string().contains("API key not set"));
    }

    #[test]
    fn test_fail_json_returns_error() {
        let failure = AnalysisFailure {
            kind: ErrorKind::Model,
            message: "Completion failed: empty response".to_string(),
            diagnostic: None,
        };
        let err = fail(failure, true, false).unwrap_err();
        assert_eq!(err.to_string(), "Completion failed: empty response");
    }
}
