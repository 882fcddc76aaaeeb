//! Purchase relationship recording.
//!
//! Records `(:Customer)-[:PLACED]->(:Order)-[:CONTAINS]->(:Product)` paths
//! with merge semantics: repeated submissions of the same identifiers never
//! create duplicate nodes or edges.

pub mod model;

use tracing::{debug, info};

use crate::error::ShopResult;
use crate::store::PurchaseGraph;
use model::{GraphCounts, Purchase};

/// Validate a triple and merge it into the graph.
///
/// Validation happens before any write; an empty identifier never reaches
/// the store. Store failures are returned as-is, without retry.
pub async fn record(
    graph: &dyn PurchaseGraph,
    customer: &str,
    order: &str,
    product: &str,
) -> ShopResult<Purchase> {
    let purchase = Purchase::new(customer, order, product)?;

    graph.merge_purchase(&purchase).await?;

    info!(
        customer = %purchase.customer,
        order = %purchase.order,
        product = %purchase.product,
        "Recorded purchase"
    );
    Ok(purchase)
}

/// List all recorded purchases.
pub async fn list(graph: &dyn PurchaseGraph) -> ShopResult<Vec<Purchase>> {
    let purchases = graph.list_purchases().await?;
    debug!(count = purchases.len(), "Listed purchases");
    Ok(purchases)
}

/// Node and relationship counts.
pub async fn counts(graph: &dyn PurchaseGraph) -> ShopResult<GraphCounts> {
    graph.counts().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryPurchaseGraph;
    use crate::ShopError;

    #[tokio::test]
    async fn test_record_twice_is_idempotent() {
        let graph = InMemoryPurchaseGraph::new();

        record(&graph, "alice", "order-1", "Widget").await.unwrap();
        record(&graph, "alice", "order-1", "Widget").await.unwrap();

        let counts = counts(&graph).await.unwrap();
        assert_eq!(
            counts,
            GraphCounts { customers: 1, orders: 1, products: 1, placed: 1, contains: 1 }
        );
        assert_eq!(list(&graph).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_customer_writes_nothing() {
        let graph = InMemoryPurchaseGraph::new();

        let err = record(&graph, "", "o1", "p1").await.unwrap_err();
        assert!(matches!(err, ShopError::Validation(_)));
        assert_eq!(counts(&graph).await.unwrap(), GraphCounts::default());
    }

    #[tokio::test]
    async fn test_order_with_multiple_products() {
        let graph = InMemoryPurchaseGraph::new();

        record(&graph, "alice", "order-1", "Widget").await.unwrap();
        record(&graph, "alice", "order-1", "Gadget").await.unwrap();

        let counts = counts(&graph).await.unwrap();
        assert_eq!(counts.orders, 1);
        assert_eq!(counts.products, 2);
        assert_eq!(counts.placed, 1);
        assert_eq!(counts.contains, 2);

        let purchases = list(&graph).await.unwrap();
        let products: Vec<&str> = purchases.iter().map(|p| p.product.as_str()).collect();
        assert_eq!(products, vec!["Gadget", "Widget"]);
    }

    #[tokio::test]
    async fn test_shared_product_is_one_node() {
        let graph = InMemoryPurchaseGraph::new();

        record(&graph, "alice", "order-1", "Widget").await.unwrap();
        record(&graph, "bob", "order-2", "Widget").await.unwrap();

        let counts = counts(&graph).await.unwrap();
        assert_eq!(counts.customers, 2);
        assert_eq!(counts.products, 1);
        assert_eq!(counts.contains, 2);
    }
}
