//! Customer account route handlers.

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use shop_core::customer::{self, model::CustomerRecord, DEFAULT_LIST_LIMIT};
use shop_core::{session, ShopError};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub c_name: Option<String>,
    pub c_address: Option<String>,
    pub c_password: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub c_name: Option<String>,
    pub c_password: Option<String>,
}

pub async fn list_customers(State(state): State<AppState>) -> ApiResult<Json<Vec<CustomerRecord>>> {
    let customers = customer::list(state.accounts.as_ref(), DEFAULT_LIST_LIMIT).await?;
    Ok(Json(customers))
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(req) = payload?;

    let created = customer::register(
        state.accounts.as_ref(),
        req.c_name.as_deref().unwrap_or_default(),
        req.c_address.as_deref().unwrap_or_default(),
        req.c_password.as_deref().unwrap_or_default(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Customer registered", "customer": created })),
    ))
}

/// Authenticate and store the customer record as their session.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = payload?;

    let found = customer::authenticate(
        state.accounts.as_ref(),
        req.c_name.as_deref().unwrap_or_default(),
        req.c_password.as_deref().unwrap_or_default(),
    )
    .await?
    .ok_or_else(|| ShopError::Auth("Invalid credentials".to_string()))?;

    session::start_customer_session(state.sessions.as_ref(), &found).await?;

    Ok(Json(json!({ "message": "Login successful", "customer": found })))
}
