//! `SessionStore` and `ProductCatalog` over Redis.

use async_trait::async_trait;
use shop_core::catalog::model::{NewProduct, Product};
use shop_core::session::SessionBlob;
use shop_core::{ProductCatalog, SessionStore, ShopError, ShopResult};
use tracing::debug;

use crate::client::{RedisError, RedisPool};
use crate::queries::{products, sessions};

impl From<RedisError> for ShopError {
    fn from(e: RedisError) -> Self {
        ShopError::storage(e)
    }
}

/// Sessions as JSON strings in Redis.
#[derive(Clone)]
pub struct RedisSessionStore {
    pool: RedisPool,
}

impl RedisSessionStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, key: &str) -> ShopResult<Option<SessionBlob>> {
        Ok(sessions::get_session(&self.pool, key).await?)
    }

    async fn set(&self, key: &str, blob: &SessionBlob) -> ShopResult<()> {
        Ok(sessions::set_session(&self.pool, key, blob).await?)
    }
}

/// Product documents in Redis hashes.
#[derive(Clone)]
pub struct RedisProductCatalog {
    pool: RedisPool,
}

impl RedisProductCatalog {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductCatalog for RedisProductCatalog {
    async fn list(&self) -> ShopResult<Vec<Product>> {
        Ok(products::list_products(&self.pool).await?)
    }

    async fn insert(&self, product: NewProduct) -> ShopResult<Product> {
        let product = product.into_product();
        products::create_product(&self.pool, &product).await?;
        debug!(product_id = %product.id, "Stored product document");
        Ok(product)
    }
}
