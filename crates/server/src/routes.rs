use std::{path::Path, sync::Arc};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use configs::AssetsConfig;
use service::{
    admin::{kv_store::KvStore, menu_store::MenuStore},
    file::image_store::ImageStore,
};

use crate::openapi::ApiDoc;

pub mod storage;
pub mod menu;
pub mod upload;

/// URL prefix uploaded images are served under.
pub const IMAGES_URL_PREFIX: &str = "/images";

#[derive(Clone)]
pub struct ServerState {
    pub kv_store: Arc<dyn KvStore>,
    pub menu_store: Arc<dyn MenuStore>,
    pub image_store: Arc<ImageStore>,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: pages, storage, menu, upload and static assets.
pub fn build_router(state: ServerState, cors: CorsLayer, assets: &AssetsConfig) -> Router {
    let public_dir = Path::new(&assets.public_dir);

    // Pages and uploaded images
    let pages = Router::new()
        .route_service("/admin", ServeFile::new(public_dir.join("admin.html")))
        .route_service("/menu", ServeFile::new(public_dir.join("menu.html")))
        .nest_service(IMAGES_URL_PREFIX, ServeDir::new(&assets.images_dir));

    // JSON endpoints
    let api = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/storage", get(storage::list_keys))
        .route("/storage/:key", get(storage::get_value).post(storage::put_value))
        .route("/menu.json", get(menu::get_menu))
        .route("/save-menu", post(menu::save_menu))
        .route(
            "/upload",
            post(upload::upload_image).layer(DefaultBodyLimit::max(assets.max_upload_bytes)),
        );

    // Compose; anything unmatched is looked up under the public directory
    pages
        .merge(api)
        .fallback_service(ServeDir::new(public_dir))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
