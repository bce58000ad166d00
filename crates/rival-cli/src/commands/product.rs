//! Product store commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use rival_core::product::model::ProductRecord;
use rival_core::product::{self as products, ProductStore, RedisProductStore};
use rival_core::AnalystConfig;
use tracing::info;

use crate::output;

#[derive(Subcommand)]
pub enum ProductCommands {
    /// Show one product
    Show(AsinArgs),

    /// List the competitors grouped under a product
    Competitors(AsinArgs),

    /// List all stored products
    List,

    /// Import products from a JSON array file
    Import(ImportArgs),
}

#[derive(Args)]
pub struct AsinArgs {
    /// Product ASIN
    pub asin: String,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Path to a JSON file holding an array of product records
    pub file: PathBuf,
}

pub async fn execute(cmd: ProductCommands, config: &AnalystConfig) -> Result<()> {
    let store = RedisProductStore::connect(&config.redis_url)
        .await
        .with_context(|| format!("Failed to connect to product store at {}", config.redis_url))?;

    match cmd {
        ProductCommands::Show(args) => match store.get_product(&args.asin).await? {
            Some(product) => output::print_product(&product),
            None => println!("{} No product found for {}", "!".yellow(), args.asin.cyan()),
        },

        ProductCommands::Competitors(args) => {
            let ctx = products::fetch_context(&store, &args.asin).await?;
            let title = ctx
                .product
                .as_ref()
                .and_then(|p| p.title.clone())
                .unwrap_or_else(|| args.asin.clone());
            println!("{} {}", "Competitors of".bold(), title.cyan());
            println!();
            output::print_products_table(&ctx.competitors);
        }

        ProductCommands::List => {
            let all = store.list_products().await?;
            output::print_products_table(&all);
        }

        ProductCommands::Import(args) => {
            let raw = std::fs::read_to_string(&args.file)
                .with_context(|| format!("Failed to read {}", args.file.display()))?;
            let records: Vec<ProductRecord> = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid product JSON in {}", args.file.display()))?;

            if let Some(pos) = records.iter().position(|r| r.asin.trim().is_empty()) {
                anyhow::bail!("Record {} in {} has no asin", pos, args.file.display());
            }

            let count = records.len();
            for record in records {
                store.put_product(record).await?;
            }
            report_import(&args.file, count);
        }
    }

    Ok(())
}

fn report_import(file: &Path, count: usize) {
    info!(file = %file.display(), count, "Imported products");
    println!("{} Imported {} products", "✓".green().bold(), count);
}
