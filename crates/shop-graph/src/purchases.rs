//! Purchase recording and listing.
//!
//! Creates nodes and relationships:
//! - (:Customer {name})-[:PLACED]->(:Order {id})
//! - (:Order {id})-[:CONTAINS]->(:Product {name})

use anyhow::Result;
use neo4rs::Query;
use shop_core::purchase::model::{GraphCounts, Purchase};
use tracing::debug;

use crate::GraphClient;

/// One statement so the whole path commits or fails together.
pub(crate) const MERGE_PURCHASE: &str =
    "MERGE (c:Customer {name: $customer})
     MERGE (o:Order {id: $order})
     MERGE (p:Product {name: $product})
     MERGE (c)-[:PLACED]->(o)
     MERGE (o)-[:CONTAINS]->(p)";

pub(crate) const LIST_PURCHASES: &str =
    "MATCH (c:Customer)-[:PLACED]->(o:Order)-[:CONTAINS]->(p:Product)
     RETURN c.name AS customer, o.id AS order_id, p.name AS product
     ORDER BY customer, order_id, product";

const COUNT_QUERIES: &[(&str, &str)] = &[
    ("customers", "MATCH (n:Customer) RETURN count(n) AS count"),
    ("orders", "MATCH (n:Order) RETURN count(n) AS count"),
    ("products", "MATCH (n:Product) RETURN count(n) AS count"),
    ("placed", "MATCH (:Customer)-[r:PLACED]->(:Order) RETURN count(r) AS count"),
    ("contains", "MATCH (:Order)-[r:CONTAINS]->(:Product) RETURN count(r) AS count"),
];

/// Merge a purchase path in a single transaction.
pub async fn merge_purchase(client: &GraphClient, purchase: &Purchase) -> Result<()> {
    let query = Query::new(MERGE_PURCHASE.to_string())
        .param("customer", purchase.customer.as_str())
        .param("order", purchase.order.as_str())
        .param("product", purchase.product.as_str());

    client.execute_in_txn(query).await?;

    debug!(customer = %purchase.customer, order = %purchase.order, product = %purchase.product, "Merged purchase");
    Ok(())
}

/// List every customer → order → product path.
pub async fn list_purchases(client: &GraphClient) -> Result<Vec<Purchase>> {
    let rows = client.query(Query::new(LIST_PURCHASES.to_string())).await?;

    let mut purchases = Vec::with_capacity(rows.len());
    for row in rows {
        let customer: String = row.get("customer").unwrap_or_default();
        let order: String = row.get("order_id").unwrap_or_default();
        let product: String = row.get("product").unwrap_or_default();

        if !customer.is_empty() && !order.is_empty() && !product.is_empty() {
            purchases.push(Purchase { customer, order, product });
        }
    }

    Ok(purchases)
}

/// Count purchase-graph nodes and relationships.
pub async fn get_counts(client: &GraphClient) -> Result<GraphCounts> {
    let mut counts = GraphCounts::default();

    for (field, cypher) in COUNT_QUERIES {
        let value: i64 = client
            .query_scalar(Query::new(cypher.to_string()), "count")
            .await?
            .unwrap_or(0);
        let value = value.max(0) as usize;

        match *field {
            "customers" => counts.customers = value,
            "orders" => counts.orders = value,
            "products" => counts.products = value,
            "placed" => counts.placed = value,
            _ => counts.contains = value,
        }
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_never_creates() {
        assert!(!MERGE_PURCHASE.contains("CREATE"));
        assert_eq!(MERGE_PURCHASE.matches("MERGE").count(), 5);
    }

    #[test]
    fn test_statements_share_labels() {
        for label in ["Customer", "Order", "Product"] {
            assert!(MERGE_PURCHASE.contains(&format!(":{} ", label)), "{}", label);
            assert!(LIST_PURCHASES.contains(&format!(":{})", label)), "{}", label);
        }
        for rel in ["PLACED", "CONTAINS"] {
            assert!(MERGE_PURCHASE.contains(&format!("[:{}]", rel)));
            assert!(LIST_PURCHASES.contains(&format!("[:{}]", rel)));
        }
    }

    #[test]
    fn test_merge_binds_all_parameters() {
        for param in ["$customer", "$order", "$product"] {
            assert!(MERGE_PURCHASE.contains(param), "{}", param);
        }
    }
}
