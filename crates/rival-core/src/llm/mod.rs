//! Chat completion clients.
//!
//! The pipeline depends on a callable that turns a prompt into raw model
//! text; this module defines that trait, an OpenAI-compatible HTTP client
//! and a mock.

mod mock;
mod openai;

pub use mock::MockCompletion;
pub use openai::{OpenAiClient, DEFAULT_API_BASE};

use async_trait::async_trait;
use thiserror::Error;

/// One single-turn completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
}

impl CompletionRequest {
    /// A deterministic request (temperature 0).
    pub fn deterministic(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: 0.0,
        }
    }
}

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("No content in completion response")]
    EmptyResponse,

    #[error("{0}")]
    Provider(String),
}

/// Turns a prompt into raw model output.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
