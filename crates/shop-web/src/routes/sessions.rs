//! Session route handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};
use shop_core::{session, ShopError};

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn get_session(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> ApiResult<Json<Value>> {
    let blob = session::get_session(state.sessions.as_ref(), &user)
        .await?
        .ok_or_else(|| ShopError::NotFound("Session not found".to_string()))?;

    Ok(Json(json!({ "session": blob })))
}

pub async fn save_session(
    State(state): State<AppState>,
    Path(user): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(blob) = payload?;

    session::save_session(state.sessions.as_ref(), &user, &blob).await?;

    Ok(Json(json!({ "message": "Session saved" })))
}
