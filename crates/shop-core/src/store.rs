//! Store traits, one per datastore.
//!
//! Handlers only ever see these traits. Backends are constructed once at
//! startup and injected as `Arc<dyn Trait>`.

use async_trait::async_trait;

use crate::catalog::model::{ImageUpload, NewProduct, Product};
use crate::customer::model::CustomerRecord;
use crate::error::ShopResult;
use crate::purchase::model::{GraphCounts, Purchase};
use crate::session::SessionBlob;

/// Graph store holding `Customer -PLACED-> Order -CONTAINS-> Product` paths.
#[async_trait]
pub trait PurchaseGraph: Send + Sync {
    /// Merge the three nodes and two edges of a purchase.
    ///
    /// Must be idempotent: merging the same purchase twice leaves the graph
    /// as merging it once.
    async fn merge_purchase(&self, purchase: &Purchase) -> ShopResult<()>;

    /// List every recorded customer → order → product path.
    async fn list_purchases(&self) -> ShopResult<Vec<Purchase>>;

    /// Node and relationship counts.
    async fn counts(&self) -> ShopResult<GraphCounts>;
}

/// Key-value session store.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns `None` for a missing key.
    async fn get(&self, key: &str) -> ShopResult<Option<SessionBlob>>;

    async fn set(&self, key: &str, blob: &SessionBlob) -> ShopResult<()>;
}

/// Document store for the product catalog.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// All products, oldest first.
    async fn list(&self) -> ShopResult<Vec<Product>>;

    /// Insert a validated product. Names are not unique.
    async fn insert(&self, product: NewProduct) -> ShopResult<Product>;
}

/// Relational customer account table.
#[async_trait]
pub trait CustomerAccounts: Send + Sync {
    /// Insert a customer with an already-hashed password.
    ///
    /// Fails with `ShopError::Conflict` when the name is taken.
    async fn insert(&self, name: &str, address: &str, password_hash: &str) -> ShopResult<CustomerRecord>;

    /// Look up a customer and their stored password hash by name.
    async fn find_with_hash(&self, name: &str) -> ShopResult<Option<(CustomerRecord, String)>>;

    /// First `limit` customers ordered by id.
    async fn list(&self, limit: usize) -> ShopResult<Vec<CustomerRecord>>;
}

/// Storage for uploaded product images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store the image and return a URL referencing it.
    async fn store(&self, upload: ImageUpload) -> ShopResult<String>;
}
