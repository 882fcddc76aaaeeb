//! Purchase graph route handlers.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use shop_core::purchase::{self, model::Purchase};

use crate::error::ApiResult;
use crate::state::AppState;

/// Fields are optional so a missing one is reported as a 400 with an
/// `error` body instead of an extractor rejection.
#[derive(Deserialize)]
pub struct RecordPurchaseRequest {
    pub customer: Option<String>,
    pub order: Option<String>,
    pub product: Option<String>,
}

pub async fn record_purchase(
    State(state): State<AppState>,
    payload: Result<Json<RecordPurchaseRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = payload?;

    purchase::record(
        state.graph.as_ref(),
        req.customer.as_deref().unwrap_or_default(),
        req.order.as_deref().unwrap_or_default(),
        req.product.as_deref().unwrap_or_default(),
    )
    .await?;

    Ok(Json(json!({ "message": "Order recorded successfully in graph DB" })))
}

pub async fn list_purchases(State(state): State<AppState>) -> ApiResult<Json<Vec<Purchase>>> {
    let purchases = purchase::list(state.graph.as_ref()).await?;
    Ok(Json(purchases))
}
