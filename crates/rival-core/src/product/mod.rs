//! Product lookup.
//!
//! The analysis pipeline only reads products: one record by ASIN and the
//! competitors grouped under it. `ProductStore` is the seam between the
//! pipeline and the backing store.

pub mod model;

use async_trait::async_trait;
use rival_db::{DbError, DbPool, DbResult, ProductFilter, ProductRow};
use tracing::debug;

use model::ProductRecord;

/// Read access to product records.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetch one product. A missing record is `Ok(None)`.
    async fn get_product(&self, asin: &str) -> DbResult<Option<ProductRecord>>;

    /// Fetch every product matching the filter, in store order.
    async fn search_products(&self, filter: &ProductFilter) -> DbResult<Vec<ProductRecord>>;
}

/// A product and the competitors grouped under it.
#[derive(Debug, Clone, Default)]
pub struct ProductContext {
    pub product: Option<ProductRecord>,
    pub competitors: Vec<ProductRecord>,
}

/// Fetch the product for `asin` and the records whose parent is `asin`.
pub async fn fetch_context(store: &dyn ProductStore, asin: &str) -> DbResult<ProductContext> {
    let product = store.get_product(asin).await?;
    let competitors = store.search_products(&ProductFilter::by_parent(asin)).await?;
    debug!(
        asin,
        found = product.is_some(),
        competitors = competitors.len(),
        "Fetched product context"
    );
    Ok(ProductContext { product, competitors })
}

/// Redis-backed store.
#[derive(Clone)]
pub struct RedisProductStore {
    pool: DbPool,
}

impl RedisProductStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Connect to Redis at `redis_url`.
    pub async fn connect(redis_url: &str) -> DbResult<Self> {
        Ok(Self::new(rival_db::init_pool(redis_url).await?))
    }

    /// Store a product, replacing any existing record with the same ASIN.
    pub async fn put_product(&self, product: ProductRecord) -> DbResult<()> {
        rival_db::products::put_product(&self.pool, &product.into_row()).await
    }

    pub async fn list_products(&self) -> DbResult<Vec<ProductRecord>> {
        let rows = rival_db::products::list_products(&self.pool).await?;
        Ok(rows.into_iter().map(ProductRecord::from_row).collect())
    }
}

#[async_trait]
impl ProductStore for RedisProductStore {
    async fn get_product(&self, asin: &str) -> DbResult<Option<ProductRecord>> {
        let row = rival_db::products::get_product(&self.pool, asin).await?;
        Ok(row.map(ProductRecord::from_row))
    }

    async fn search_products(&self, filter: &ProductFilter) -> DbResult<Vec<ProductRecord>> {
        let rows = rival_db::products::search_products(&self.pool, filter).await?;
        Ok(rows.into_iter().map(ProductRecord::from_row).collect())
    }
}

/// In-process store holding rows in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryProductStore {
    rows: Vec<ProductRow>,
    unavailable: bool,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every query fails, for exercising error paths.
    pub fn unavailable() -> Self {
        Self {
            rows: Vec::new(),
            unavailable: true,
        }
    }

    /// Add a product, replacing any existing record with the same ASIN.
    pub fn insert(&mut self, product: ProductRecord) {
        let row = product.into_row();
        match self.rows.iter_mut().find(|r| r.asin == row.asin) {
            Some(existing) => *existing = row,
            None => self.rows.push(row),
        }
    }

    pub fn with_product(mut self, product: ProductRecord) -> Self {
        self.insert(product);
        self
    }

    fn check(&self) -> DbResult<()> {
        if self.unavailable {
            return Err(DbError::Unavailable("memory store marked unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn get_product(&self, asin: &str) -> DbResult<Option<ProductRecord>> {
        self.check()?;
        Ok(self
            .rows
            .iter()
            .find(|r| r.asin == asin)
            .cloned()
            .map(ProductRecord::from_row))
    }

    async fn search_products(&self, filter: &ProductFilter) -> DbResult<Vec<ProductRecord>> {
        self.check()?;
        Ok(self
            .rows
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .map(ProductRecord::from_row)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(asin: &str, parent: Option<&str>) -> ProductRecord {
        ProductRecord {
            asin: asin.to_string(),
            title: Some(format!("Product {}", asin)),
            parent_asin: parent.map(str::to_string),
            ..ProductRecord::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_context_groups_by_parent() {
        let store = MemoryProductStore::new()
            .with_product(product("X1", None))
            .with_product(product("Y2", Some("X1")))
            .with_product(product("Z3", Some("OTHER")))
            .with_product(product("W4", Some("X1")));

        let ctx = fetch_context(&store, "X1").await.unwrap();
        assert_eq!(ctx.product.unwrap().asin, "X1");
        let asins: Vec<&str> = ctx.competitors.iter().map(|c| c.asin.as_str()).collect();
        assert_eq!(asins, vec!["Y2", "W4"]);
    }

    #[tokio::test]
    async fn test_fetch_context_missing_product_is_not_an_error() {
        let store = MemoryProductStore::new();
        let ctx = fetch_context(&store, "NOPE").await.unwrap();
        assert!(ctx.product.is_none());
        assert!(ctx.competitors.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store_propagates() {
        let store = MemoryProductStore::unavailable();
        assert!(fetch_context(&store, "X1").await.is_err());
    }

    #[test]
    fn test_insert_replaces_same_asin() {
        let mut store = MemoryProductStore::new();
        store.insert(product("X1", None));
        store.insert(ProductRecord {
            title: Some("Renamed".to_string()),
            ..product("X1", None)
        });
        assert_eq!(store.rows.len(), 1);
        assert_eq!(store.rows[0].title.as_deref(), Some("Renamed"));
    }
}
