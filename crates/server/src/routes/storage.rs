use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    Json,
};
use serde_json::Value;

use common::types::MessageResponse;
use service::storage::StorageKey;

use crate::errors::ApiError;
use crate::routes::ServerState;

fn parse_key(key: Result<Path<String>, PathRejection>) -> Result<StorageKey, ApiError> {
    let Path(raw) = key.map_err(|e| ApiError::bad_request(e.body_text()))?;
    StorageKey::parse(&raw).map_err(ApiError::from)
}

/// Stored value for a key, or JSON `null` when the key was never written.
#[utoipa::path(
    get,
    path = "/storage/{key}",
    tag = "storage",
    params(("key" = String, Path, description = "Record key")),
    responses(
        (status = 200, description = "Stored JSON value, or null when unset"),
        (status = 400, description = "Invalid key", body = crate::openapi::MessageDoc),
        (status = 500, description = "Read failure or corrupt data", body = crate::openapi::MessageDoc)
    )
)]
pub async fn get_value(
    State(state): State<ServerState>,
    key: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let key = parse_key(key)?;
    let value = state
        .kv_store
        .get(&key)
        .await
        .map_err(|e| ApiError::read(e, "Error reading storage"))?;
    Ok(Json(value.unwrap_or(Value::Null)))
}

/// Replace the value for a key with the request body.
#[utoipa::path(
    post,
    path = "/storage/{key}",
    tag = "storage",
    params(("key" = String, Path, description = "Record key")),
    request_body(content = Object, description = "Any JSON document", content_type = "application/json"),
    responses(
        (status = 200, description = "Saved", body = crate::openapi::MessageDoc),
        (status = 400, description = "Invalid key or malformed JSON", body = crate::openapi::MessageDoc),
        (status = 413, description = "Body too large", body = crate::openapi::MessageDoc),
        (status = 415, description = "Missing JSON content type", body = crate::openapi::MessageDoc),
        (status = 500, description = "Write failure", body = crate::openapi::MessageDoc)
    )
)]
pub async fn put_value(
    State(state): State<ServerState>,
    key: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let key = parse_key(key)?;
    let Json(value) = body.map_err(|e| ApiError::new(e.status(), e.body_text()))?;
    state
        .kv_store
        .put(&key, &value)
        .await
        .map_err(|e| ApiError::write(e, &format!("Error saving key \"{key}\"")))?;
    Ok(Json(MessageResponse::new(format!("Saved key \"{key}\" successfully"))))
}

/// Sorted list of stored keys.
#[utoipa::path(
    get,
    path = "/storage",
    tag = "storage",
    responses(
        (status = 200, description = "Stored keys", body = [String]),
        (status = 500, description = "Read failure", body = crate::openapi::MessageDoc)
    )
)]
pub async fn list_keys(State(state): State<ServerState>) -> Result<Json<Vec<String>>, ApiError> {
    let keys = state
        .kv_store
        .list_keys()
        .await
        .map_err(|e| ApiError::read(e, "Error reading storage"))?;
    Ok(Json(keys))
}
