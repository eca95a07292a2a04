//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Ensure the writable directories exist; warn when the public asset
/// directory is missing since pages will 404 without it.
pub async fn ensure_env(public_dir: &str, writable_dirs: &[&str]) -> anyhow::Result<()> {
    if tokio::fs::metadata(public_dir).await.is_err() {
        warn!(%public_dir, "public assets directory not found; admin and menu pages may 404");
    }
    for dir in writable_dirs {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {dir}: {e}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_writable_dirs() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("common_env_{}", uuid::Uuid::new_v4()));
        let data = root.join("storage");
        let images = root.join("public/images");
        let data_s = data.to_string_lossy().to_string();
        let images_s = images.to_string_lossy().to_string();

        ensure_env("/nonexistent-public-dir", &[&data_s, &images_s]).await?;
        assert!(data.is_dir());
        assert!(images.is_dir());

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
