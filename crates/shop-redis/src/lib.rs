//! Shop Redis Data Layer
//!
//! Sessions are plain JSON strings under `shop:session:{key}`. Products are
//! JSON documents in `shop:product:{id}` hashes, indexed by the
//! `shop:products:all` set.

pub mod client;
pub mod queries;
pub mod stores;

pub use client::{RedisError, RedisPool, RedisResult, init_pool};
pub use queries::products;
pub use queries::sessions;
pub use stores::{RedisProductCatalog, RedisSessionStore};
