//! Product queries — Redis implementation.
//!
//! Layout:
//! - `rival:product:{asin}` hash, field `data` holds the JSON row
//! - `rival:products:all` set of every stored ASIN
//! - `rival:parent:{parent_asin}` set of ASINs grouped under a parent

use crate::client::{DbPool, DbResult};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::debug;

const ALL_PRODUCTS_KEY: &str = "rival:products:all";

/// Product row as stored in Redis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub asin: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub amazon_domain: Option<String>,
    #[serde(default)]
    pub parent_asin: Option<String>,
}

/// Filter for `search_products`. An unset parent matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub parent_asin: Option<String>,
}

impl ProductFilter {
    /// Filter selecting the products grouped under `parent_asin`.
    pub fn by_parent(parent_asin: &str) -> Self {
        Self {
            parent_asin: Some(parent_asin.to_string()),
        }
    }

    /// Whether a row satisfies the filter.
    pub fn matches(&self, row: &ProductRow) -> bool {
        match self.parent_asin {
            Some(ref parent) => row.parent_asin.as_deref() == Some(parent.as_str()),
            None => true,
        }
    }
}

fn product_key(asin: &str) -> String {
    format!("rival:product:{}", asin)
}

fn parent_key(parent_asin: &str) -> String {
    format!("rival:parent:{}", parent_asin)
}

/// Insert or replace a product row and update its indexes.
pub async fn put_product(pool: &DbPool, row: &ProductRow) -> DbResult<()> {
    let mut conn = pool.clone();

    // Drop the stale parent index entry when a re-import changes the parent.
    if let Some(existing) = get_product(pool, &row.asin).await? {
        if let Some(old_parent) = existing.parent_asin {
            if row.parent_asin.as_deref() != Some(old_parent.as_str()) {
                conn.srem::<_, _, ()>(parent_key(&old_parent), &row.asin).await?;
            }
        }
    }

    let json = serde_json::to_string(row)?;
    conn.hset::<_, _, _, ()>(product_key(&row.asin), "data", &json).await?;
    conn.sadd::<_, _, ()>(ALL_PRODUCTS_KEY, &row.asin).await?;
    if let Some(ref parent) = row.parent_asin {
        conn.sadd::<_, _, ()>(parent_key(parent), &row.asin).await?;
    }
    debug!(asin = %row.asin, "Stored product");
    Ok(())
}

/// Get a product by ASIN. A missing record is `Ok(None)`, not an error.
pub async fn get_product(pool: &DbPool, asin: &str) -> DbResult<Option<ProductRow>> {
    let mut conn = pool.clone();
    let json: Option<String> = conn.hget(product_key(asin), "data").await?;
    match json {
        Some(j) => Ok(Some(serde_json::from_str(&j)?)),
        None => Ok(None),
    }
}

/// List every stored product, ordered by ASIN.
pub async fn list_products(pool: &DbPool) -> DbResult<Vec<ProductRow>> {
    let mut conn = pool.clone();
    let asins: Vec<String> = conn.smembers(ALL_PRODUCTS_KEY).await?;
    load_rows(pool, asins).await
}

/// Search products matching a filter, ordered by ASIN.
///
/// A parent filter is served from the parent index; anything else scans
/// the full product set.
pub async fn search_products(pool: &DbPool, filter: &ProductFilter) -> DbResult<Vec<ProductRow>> {
    let mut conn = pool.clone();
    let asins: Vec<String> = match filter.parent_asin {
        Some(ref parent) => conn.smembers(parent_key(parent)).await?,
        None => conn.smembers(ALL_PRODUCTS_KEY).await?,
    };

    let rows = load_rows(pool, asins).await?;
    let matched: Vec<ProductRow> = rows.into_iter().filter(|r| filter.matches(r)).collect();
    debug!(?filter, count = matched.len(), "Searched products");
    Ok(matched)
}

async fn load_rows(pool: &DbPool, mut asins: Vec<String>) -> DbResult<Vec<ProductRow>> {
    asins.sort();
    let mut rows = Vec::with_capacity(asins.len());
    for asin in asins {
        // Index entries can outlive their hash; skip them.
        if let Some(row) = get_product(pool, &asin).await? {
            rows.push(row);
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(asin: &str, parent: Option<&str>) -> ProductRow {
        ProductRow {
            asin: asin.to_string(),
            parent_asin: parent.map(str::to_string),
            ..ProductRow::default()
        }
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = ProductFilter::default();
        assert!(filter.matches(&row("A1", None)));
        assert!(filter.matches(&row("A2", Some("P"))));
    }

    #[test]
    fn test_parent_filter() {
        let filter = ProductFilter::by_parent("P1");
        assert!(filter.matches(&row("A1", Some("P1"))));
        assert!(!filter.matches(&row("A2", Some("P2"))));
        assert!(!filter.matches(&row("A3", None)));
    }

    #[test]
    fn test_row_deserializes_with_missing_fields() {
        let row: ProductRow = serde_json::from_str(r#"{"asin": "B00X"}"#).unwrap();
        assert_eq!(row.asin, "B00X");
        assert_eq!(row.title, None);
        assert_eq!(row.categories, None);
    }

    #[test]
    fn test_keys() {
        assert_eq!(product_key("B01"), "rival:product:B01");
        assert_eq!(parent_key("P01"), "rival:parent:P01");
    }
}
