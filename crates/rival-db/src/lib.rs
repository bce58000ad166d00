//! Rival Data Layer
//!
//! Async Redis-based storage for marketplace product records.

pub mod client;
pub mod queries;

pub use client::{DbError, DbPool, DbResult, init_pool};
pub use queries::products;
pub use queries::products::{ProductFilter, ProductRow};

/// Default Redis URL used when `REDIS_URL` is not set.
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

