//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rival_core::AnalystConfig;

pub mod analyze;
pub mod product;

/// Rival - competitor analysis for marketplace products
#[derive(Parser)]
#[command(name = "rival")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Redis URL of the product store (overrides REDIS_URL)
    #[arg(long, global = true)]
    pub redis_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an LLM competitor analysis for a product
    Analyze(analyze::AnalyzeArgs),

    /// Inspect and import product records
    #[command(subcommand)]
    Product(product::ProductCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let mut config = AnalystConfig::from_env();
        if let Some(url) = self.redis_url {
            config.redis_url = url;
        }

        match self.command {
            Commands::Analyze(args) => analyze::execute(args, config, self.verbose).await,
            Commands::Product(cmd) => product::execute(cmd, &config).await,
        }
    }
}
