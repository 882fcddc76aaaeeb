//! Shop Core Library
//!
//! Domain models, store traits and business rules for the storefront backend.
//! Each datastore (customer accounts, product catalog, sessions, purchase
//! graph, images) sits behind a trait in [`store`]; concrete backends live in
//! the `shop-db`, `shop-redis` and `shop-graph` crates, with in-memory
//! versions in [`memory`].

pub mod catalog;
pub mod customer;
pub mod error;
pub mod media;
pub mod memory;
pub mod purchase;
pub mod session;
pub mod store;

pub use error::{ShopError, ShopResult};
pub use store::{CustomerAccounts, ImageStore, ProductCatalog, PurchaseGraph, SessionStore};
