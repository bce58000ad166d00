//! Rival Core Library
//!
//! Product lookup, prompt construction, model invocation, structured output
//! parsing and report rendering for marketplace competitor analysis.

pub mod analysis;
pub mod config;
pub mod error;
pub mod llm;
pub mod product;

pub use analysis::{Analyst, AnalysisReport};
pub use config::AnalystConfig;
pub use error::{AnalysisError, AnalysisFailure, ErrorKind};
