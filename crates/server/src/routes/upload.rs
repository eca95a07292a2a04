use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};

use common::types::UploadResponse;

use crate::errors::ApiError;
use crate::routes::ServerState;

/// Store the first multipart field that carries a file name.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "upload",
    request_body(content = String, description = "multipart/form-data with one file field", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stored", body = crate::openapi::UploadDoc),
        (status = 400, description = "No file field", body = crate::openapi::MessageDoc),
        (status = 500, description = "Write failure", body = crate::openapi::MessageDoc)
    )
)]
pub async fn upload_image(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::new(e.status(), e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else { continue };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
        let url = state
            .image_store
            .save(Some(&file_name), &bytes)
            .await
            .map_err(|e| ApiError::write(e, "Error uploading image"))?;
        return Ok(Json(UploadResponse { url }));
    }

    Err(ApiError::bad_request("No file uploaded"))
}
