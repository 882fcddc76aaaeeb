//! `PurchaseGraph` implementation for the Neo4j client.

use async_trait::async_trait;
use shop_core::purchase::model::{GraphCounts, Purchase};
use shop_core::{PurchaseGraph, ShopError, ShopResult};

use crate::{purchases, GraphClient};

fn storage(e: anyhow::Error) -> ShopError {
    ShopError::Storage(format!("{:#}", e))
}

#[async_trait]
impl PurchaseGraph for GraphClient {
    async fn merge_purchase(&self, purchase: &Purchase) -> ShopResult<()> {
        purchases::merge_purchase(self, purchase).await.map_err(storage)
    }

    async fn list_purchases(&self) -> ShopResult<Vec<Purchase>> {
        purchases::list_purchases(self).await.map_err(storage)
    }

    async fn counts(&self) -> ShopResult<GraphCounts> {
        purchases::get_counts(self).await.map_err(storage)
    }
}
