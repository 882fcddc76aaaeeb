//! Product document queries over Redis hashes.

use crate::client::{RedisPool, RedisResult};
use redis::AsyncCommands;
use shop_core::catalog::model::Product;
use tracing::warn;

const PRODUCT_INDEX: &str = "shop:products:all";

pub(crate) fn product_key(id: &str) -> String {
    format!("shop:product:{}", id)
}

/// Store the document and index it in one `MULTI`/`EXEC`, so a product is
/// either listed or absent.
pub async fn create_product(pool: &RedisPool, product: &Product) -> RedisResult<()> {
    let mut conn = pool.clone();
    let pipe = create_product_pipeline(product)?;
    let () = pipe.query_async(&mut conn).await?;
    Ok(())
}

fn create_product_pipeline(product: &Product) -> RedisResult<redis::Pipeline> {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .hset(product_key(&product.id), "data", serde_json::to_string(product)?)
        .ignore()
        .sadd(PRODUCT_INDEX, &product.id)
        .ignore();
    Ok(pipe)
}

/// All products, oldest first.
pub async fn list_products(pool: &RedisPool) -> RedisResult<Vec<Product>> {
    let mut conn = pool.clone();
    let ids: Vec<String> = conn.smembers(PRODUCT_INDEX).await?;
    let mut products = Vec::new();
    for id in ids {
        let mut c = pool.clone();
        let json: Option<String> = c.hget(product_key(&id), "data").await?;
        let Some(j) = json else {
            warn!(product_id = %id, "Indexed product has no document, skipping");
            continue;
        };
        match serde_json::from_str::<Product>(&j) {
            Ok(row) => products.push(row),
            Err(e) => warn!(product_id = %id, error = %e, "Unreadable product document, skipping"),
        }
    }
    products.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_key() {
        assert_eq!(product_key("42"), "shop:product:42");
    }

    #[test]
    fn test_create_is_one_transaction() {
        let product = Product {
            id: "p-1".to_string(),
            name: "Widget".to_string(),
            price: 9.99,
            image_url: "/media/p-1.png".to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
        };

        let packed = create_product_pipeline(&product).unwrap().get_packed_pipeline();
        let text = String::from_utf8_lossy(&packed);

        assert!(text.starts_with("*1\r\n$5\r\nMULTI\r\n"), "{}", text);
        assert!(text.contains("EXEC"));
        assert!(text.contains("HSET"));
        assert!(text.contains("SADD"));
        assert!(text.contains(PRODUCT_INDEX));
        assert!(!text.contains("$4\r\nname\r\n"));
    }
}
