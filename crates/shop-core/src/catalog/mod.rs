//! Product catalog.

pub mod model;

use tracing::info;

use crate::error::{require_non_empty, ShopError, ShopResult};
use crate::store::{ImageStore, ProductCatalog};
use model::{ImageUpload, NewProduct, Product};

/// List all products.
pub async fn list_products(catalog: &dyn ProductCatalog) -> ShopResult<Vec<Product>> {
    catalog.list().await
}

/// Create a product from a name, price and uploaded image.
///
/// All inputs are checked before the image is stored, so a rejected request
/// leaves neither an image nor a catalog document behind.
pub async fn create_product(
    catalog: &dyn ProductCatalog,
    images: &dyn ImageStore,
    name: Option<&str>,
    price: Option<f64>,
    image: Option<ImageUpload>,
) -> ShopResult<Product> {
    let name = name.unwrap_or_default();
    require_non_empty("name", name)?;

    let price = price.ok_or_else(|| ShopError::validation("Missing required field: price"))?;
    if !price.is_finite() || price < 0.0 {
        return Err(ShopError::validation("Price must be a non-negative number"));
    }

    let image = match image {
        Some(upload) if !upload.bytes.is_empty() => upload,
        _ => return Err(ShopError::validation("Product image is required")),
    };

    let image_url = images.store(image).await?;
    let product = catalog
        .insert(NewProduct { name: name.to_string(), price, image_url })
        .await?;

    info!(product_id = %product.id, name = %product.name, "Created product");
    Ok(product)
}

/// Parse a price field sent as text.
pub fn parse_price(raw: &str) -> ShopResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ShopError::validation(format!("Invalid price: {}", raw)))
}
