//! Query modules for entities stored in Redis.

pub mod products;
