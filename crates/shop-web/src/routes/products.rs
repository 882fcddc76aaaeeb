//! Product catalog route handlers.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use shop_core::catalog::{self, model::{ImageUpload, Product}};

use crate::error::ApiResult;
use crate::state::AppState;

/// Upper bound on a product upload request body.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    let products = catalog::list_products(state.catalog.as_ref()).await?;
    Ok(Json(products))
}

/// Create a product from a multipart form with `name`, `price` and `image`.
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut multipart = multipart?;

    let mut name: Option<String> = None;
    let mut price_raw: Option<String> = None;
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => name = Some(field.text().await?),
            Some("price") => price_raw = Some(field.text().await?),
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?.to_vec();
                image = Some(ImageUpload { file_name, content_type, bytes });
            }
            _ => {}
        }
    }

    let price = price_raw
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(catalog::parse_price)
        .transpose()?;

    let product = catalog::create_product(
        state.catalog.as_ref(),
        state.images.as_ref(),
        name.as_deref(),
        price,
        image,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Product added successfully",
            "product": product,
        })),
    ))
}
