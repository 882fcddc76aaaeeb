//! Query modules for shop entities stored in Redis.

pub mod products;
pub mod sessions;
