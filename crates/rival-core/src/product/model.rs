//! Product domain models.

use rival_db::ProductRow;
use serde::{Deserialize, Serialize};

/// A product snapshot fetched fresh for one analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
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

impl ProductRecord {
    /// Create a record from a database row.
    pub fn from_row(row: ProductRow) -> Self {
        Self {
            asin: row.asin,
            title: row.title,
            brand: row.brand,
            price: row.price,
            currency: row.currency,
            rating: row.rating,
            categories: row.categories,
            amazon_domain: row.amazon_domain,
            parent_asin: row.parent_asin,
        }
    }

    /// Convert back into a database row.
    pub fn into_row(self) -> ProductRow {
        ProductRow {
            asin: self.asin,
            title: self.title,
            brand: self.brand,
            price: self.price,
            currency: self.currency,
            rating: self.rating,
            categories: self.categories,
            amazon_domain: self.amazon_domain,
            parent_asin: self.parent_asin,
        }
    }
}

/// The slice of a competitor record embedded in the prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorSnapshot {
    pub asin: String,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub rating: Option<f64>,
    pub amazon_domain: Option<String>,
}

impl From<&ProductRecord> for CompetitorSnapshot {
    fn from(p: &ProductRecord) -> Self {
        Self {
            asin: p.asin.clone(),
            title: p.title.clone(),
            price: p.price,
            currency: p.currency.clone(),
            rating: p.rating,
            amazon_domain: p.amazon_domain.clone(),
        }
    }
}
