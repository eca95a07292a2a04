use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState, IMAGES_URL_PREFIX};
use service::{
    file::{image_store::ImageStore, kv_store::FileKvStore, menu_store::FileMenuStore},
    runtime,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the file-backed stores named by the config.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let kv_store = FileKvStore::new(&cfg.storage.data_dir).await?;
    let menu_store = FileMenuStore::new(&cfg.storage.menu_file).await?;
    let image_store = ImageStore::new(&cfg.assets.images_dir, IMAGES_URL_PREFIX).await?;
    Ok(ServerState { kv_store, menu_store, image_store })
}

/// Build the application router for a config; used by `run` and by tests.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    runtime::ensure_env(&cfg.assets.public_dir, &cfg.storage.data_dir, &cfg.assets.images_dir).await?;
    let state = build_state(cfg).await?;
    Ok(routes::build_router(state, build_cors(), &cfg.assets))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only on process exit");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let bind = cfg.bind_addr();
    let listener = TcpListener::bind(&bind).await.map_err(|e| {
        StartupError::InvalidConfig(format!("cannot bind {bind}: {e}"))
    })?;
    let addr = listener.local_addr()?;
    info!(%addr, "Server running: http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
