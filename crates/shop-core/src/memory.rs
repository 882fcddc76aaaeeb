//! In-memory store backends.
//!
//! Same contracts as the datastore-backed implementations. Used by
//! `shop serve --ephemeral` and by tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::model::{ImageUpload, NewProduct, Product};
use crate::customer::model::CustomerRecord;
use crate::error::{ShopError, ShopResult};
use crate::purchase::model::{GraphCounts, Purchase};
use crate::session::SessionBlob;
use crate::store::{CustomerAccounts, ImageStore, ProductCatalog, PurchaseGraph, SessionStore};

#[derive(Debug, Default)]
struct GraphState {
    customers: BTreeSet<String>,
    orders: BTreeSet<String>,
    products: BTreeSet<String>,
    placed: BTreeSet<(String, String)>,
    contains: BTreeSet<(String, String)>,
}

/// Purchase graph kept in ordered sets; set insertion gives merge semantics.
#[derive(Debug, Default)]
pub struct InMemoryPurchaseGraph {
    state: RwLock<GraphState>,
}

impl InMemoryPurchaseGraph {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PurchaseGraph for InMemoryPurchaseGraph {
    async fn merge_purchase(&self, purchase: &Purchase) -> ShopResult<()> {
        let mut state = self.state.write().await;
        state.customers.insert(purchase.customer.clone());
        state.orders.insert(purchase.order.clone());
        state.products.insert(purchase.product.clone());
        state.placed.insert((purchase.customer.clone(), purchase.order.clone()));
        state.contains.insert((purchase.order.clone(), purchase.product.clone()));
        Ok(())
    }

    async fn list_purchases(&self) -> ShopResult<Vec<Purchase>> {
        let state = self.state.read().await;
        let mut purchases = Vec::new();
        for (customer, order) in &state.placed {
            for (_, product) in state.contains.iter().filter(|(o, _)| o == order) {
                purchases.push(Purchase {
                    customer: customer.clone(),
                    order: order.clone(),
                    product: product.clone(),
                });
            }
        }
        Ok(purchases)
    }

    async fn counts(&self) -> ShopResult<GraphCounts> {
        let state = self.state.read().await;
        Ok(GraphCounts {
            customers: state.customers.len(),
            orders: state.orders.len(),
            products: state.products.len(),
            placed: state.placed.len(),
            contains: state.contains.len(),
        })
    }
}

/// Session store backed by a hash map. Entries never expire.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionBlob>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> ShopResult<Option<SessionBlob>> {
        Ok(self.sessions.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, blob: &SessionBlob) -> ShopResult<()> {
        self.sessions.write().await.insert(key.to_string(), blob.clone());
        Ok(())
    }
}

/// Product catalog kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn list(&self) -> ShopResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn insert(&self, product: NewProduct) -> ShopResult<Product> {
        let product = product.into_product();
        self.products.write().await.push(product.clone());
        Ok(product)
    }
}

/// Customer table with a unique name column.
#[derive(Debug, Default)]
pub struct InMemoryCustomerAccounts {
    rows: RwLock<Vec<(CustomerRecord, String)>>,
}

impl InMemoryCustomerAccounts {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerAccounts for InMemoryCustomerAccounts {
    async fn insert(&self, name: &str, address: &str, password_hash: &str) -> ShopResult<CustomerRecord> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|(c, _)| c.name == name) {
            return Err(ShopError::Conflict(format!("Customer already exists: {}", name)));
        }

        let customer = CustomerRecord {
            id: rows.len() as i64 + 1,
            name: name.to_string(),
            address: address.to_string(),
        };
        rows.push((customer.clone(), password_hash.to_string()));
        Ok(customer)
    }

    async fn find_with_hash(&self, name: &str) -> ShopResult<Option<(CustomerRecord, String)>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|(c, _)| c.name == name).cloned())
    }

    async fn list(&self, limit: usize) -> ShopResult<Vec<CustomerRecord>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().take(limit).map(|(c, _)| c.clone()).collect())
    }
}

/// Image store that keeps uploads in memory and hands out `memory://` URLs.
#[derive(Debug, Default)]
pub struct InMemoryImageStore {
    images: Mutex<Vec<ImageUpload>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored images.
    pub fn len(&self) -> usize {
        self.images.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn store(&self, upload: ImageUpload) -> ShopResult<String> {
        if upload.bytes.is_empty() {
            return Err(ShopError::validation("Product image is required"));
        }

        let mut images = self.images.lock().unwrap_or_else(|e| e.into_inner());
        let url = format!("memory://images/{}.{}", images.len(), upload.extension());
        images.push(upload);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listing_joins_orders_to_products() {
        let graph = InMemoryPurchaseGraph::new();
        graph
            .merge_purchase(&Purchase::new("alice", "o1", "Widget").unwrap())
            .await
            .unwrap();
        graph
            .merge_purchase(&Purchase::new("bob", "o2", "Gadget").unwrap())
            .await
            .unwrap();

        let purchases = graph.list_purchases().await.unwrap();
        assert_eq!(
            purchases,
            vec![
                Purchase::new("alice", "o1", "Widget").unwrap(),
                Purchase::new("bob", "o2", "Gadget").unwrap(),
            ]
        );
    }

    #[tokio::test]
    async fn test_customer_list_limit() {
        let accounts = InMemoryCustomerAccounts::new();
        for i in 0..5 {
            accounts.insert(&format!("c{}", i), "addr", "hash").await.unwrap();
        }
        let listed = accounts.list(3).await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].id, 1);
    }
}
