//! Error types for the analysis pipeline.

use std::error::Error as StdError;

use serde::Serialize;
use thiserror::Error;

use crate::llm::CompletionError;

/// Longest diagnostic kept for display, in characters.
pub const DIAGNOSTIC_LIMIT: usize = 8000;

/// Everything that can go wrong in one pipeline run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("OpenAI API key not set")]
    MissingApiKey,

    #[error("Product store error: {0}")]
    Store(#[from] rival_db::DbError),

    #[error("Prompt template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Completion failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("Failed to parse analysis from model output: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or invalid configuration, detected before any I/O.
    Configuration,
    /// The model call failed or its output did not match the schema.
    Model,
    /// Anything else.
    Unexpected,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingApiKey => ErrorKind::Configuration,
            Self::Completion(_) | Self::Decode(_) => ErrorKind::Model,
            Self::Store(_) | Self::Template(_) => ErrorKind::Unexpected,
        }
    }
}

/// Structured failure returned from the pipeline in place of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisFailure {
    pub kind: ErrorKind,
    pub message: String,
    /// Full error chain, truncated to `DIAGNOSTIC_LIMIT` characters.
    pub diagnostic: Option<String>,
}

impl AnalysisFailure {
    /// Short error string shown in place of a report.
    pub fn to_text(&self) -> String {
        match self.kind {
            ErrorKind::Configuration => format!("Error: {}.", self.message),
            ErrorKind::Model => format!("Error running LLM: {}", self.message),
            ErrorKind::Unexpected => format!("Unexpected error: {}", self.message),
        }
    }

    /// Longer guidance for the user.
    pub fn user_hint(&self) -> String {
        match self.kind {
            ErrorKind::Configuration => {
                format!("{}. Please set OPENAI_API_KEY in your environment.", self.message)
            }
            ErrorKind::Model => format!("LLM error: {}", self.message),
            ErrorKind::Unexpected => "Unexpected error running LLM flow. \
                 Check OPENAI_API_KEY and OPENAI_MODEL environment variables."
                .to_string(),
        }
    }
}

impl From<AnalysisError> for AnalysisFailure {
    fn from(err: AnalysisError) -> Self {
        let kind = err.kind();
        let diagnostic = match kind {
            ErrorKind::Configuration => None,
            _ => Some(truncate_diagnostic(&error_chain(&err), DIAGNOSTIC_LIMIT)),
        };
        Self {
            kind,
            message: err.to_string(),
            diagnostic,
        }
    }
}

impl std::fmt::Display for AnalysisFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Render an error and all of its sources, one per line.
pub fn error_chain(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str("\ncaused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Keep at most `limit` characters, never splitting a character.
pub fn truncate_diagnostic(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
