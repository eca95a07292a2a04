use axum::{extract::{rejection::JsonRejection, State}, Json};
use serde_json::Value;

use common::types::MessageResponse;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[utoipa::path(
    get,
    path = "/menu.json",
    tag = "menu",
    responses(
        (status = 200, description = "Saved menu document"),
        (status = 404, description = "No menu saved yet", body = crate::openapi::MessageDoc),
        (status = 500, description = "Read failure or corrupt data", body = crate::openapi::MessageDoc)
    )
)]
pub async fn get_menu(State(state): State<ServerState>) -> Result<Json<Value>, ApiError> {
    match state.menu_store.load().await {
        Ok(Some(menu)) => Ok(Json(menu)),
        Ok(None) => Err(ApiError::not_found("Menu not found")),
        Err(e) => Err(ApiError::read(e, "Error reading menu")),
    }
}

#[utoipa::path(
    post,
    path = "/save-menu",
    tag = "menu",
    request_body(content = Object, description = "Whole menu document", content_type = "application/json"),
    responses(
        (status = 200, description = "Saved", body = crate::openapi::MessageDoc),
        (status = 400, description = "Malformed JSON", body = crate::openapi::MessageDoc),
        (status = 415, description = "Missing JSON content type", body = crate::openapi::MessageDoc),
        (status = 500, description = "Write failure", body = crate::openapi::MessageDoc)
    )
)]
pub async fn save_menu(
    State(state): State<ServerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(menu) = body.map_err(|e| ApiError::new(e.status(), e.body_text()))?;
    state
        .menu_store
        .save(&menu)
        .await
        .map_err(|e| ApiError::write(e, "Error saving"))?;
    Ok(Json(MessageResponse::new("Saved successfully")))
}
