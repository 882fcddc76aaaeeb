//! Route handlers.

pub mod customers;
pub mod graph;
pub mod products;
pub mod sessions;
