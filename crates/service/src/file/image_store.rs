use std::{io::ErrorKind, path::{Path, PathBuf}, sync::Arc};

use chrono::Utc;
use tokio::{fs, io::AsyncWriteExt};
use tracing::info;

use crate::errors::ServiceError;

const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Stores uploaded images under a single directory with timestamp names.
#[derive(Clone, Debug)]
pub struct ImageStore {
    dir: PathBuf,
    url_prefix: String,
}

impl ImageStore {
    pub async fn new<P: Into<PathBuf>>(dir: P, url_prefix: &str) -> Result<Arc<Self>, ServiceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|e| ServiceError::io(&dir, e))?;
        Ok(Arc::new(Self { dir, url_prefix: url_prefix.trim_end_matches('/').to_string() }))
    }

    /// Save `bytes` as `<unix-millis>[-n]<.ext>` and return its public URL path.
    ///
    /// The extension comes from `original_name`. Files are created with
    /// `create_new`, so two uploads in the same millisecond get distinct names.
    pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> Result<String, ServiceError> {
        let ext = original_name.and_then(extension_of).map(|e| format!(".{e}")).unwrap_or_default();
        let stamp = Utc::now().timestamp_millis();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 { format!("{stamp}{ext}") } else { format!("{stamp}-{attempt}{ext}") };
            let path = self.dir.join(&name);
            let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(f) => f,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(ServiceError::io(&path, e)),
            };
            file.write_all(bytes).await.map_err(|e| ServiceError::io(&path, e))?;
            file.flush().await.map_err(|e| ServiceError::io(&path, e))?;
            info!(file = %name, size = bytes.len(), "image stored");
            return Ok(format!("{}/{}", self.url_prefix, name));
        }
        Err(ServiceError::io(
            &self.dir,
            std::io::Error::new(ErrorKind::AlreadyExists, format!("no free file name for timestamp {stamp}")),
        ))
    }
}

/// Lowercased extension of an uploaded file name, if it is plain ASCII alphanumeric.
fn extension_of(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 10 || !ext.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn extension_rules() {
        assert_eq!(extension_of("photo.JPG").as_deref(), Some("jpg"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of("evil.p/hp"), None);
        assert_eq!(extension_of("weird.ph p"), None);
    }

    #[tokio::test]
    async fn saves_with_timestamp_name_and_unique_suffix() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("svc_images_{}", Uuid::new_v4()));
        let store = ImageStore::new(&dir, "/images/").await?;

        let mut urls = Vec::new();
        for _ in 0..5 {
            urls.push(store.save(Some("dish.png"), b"\x89PNG").await?);
        }
        for url in &urls {
            let name = url.strip_prefix("/images/").expect("url prefix");
            assert!(name.ends_with(".png"));
            let stem = name.trim_end_matches(".png");
            let millis = stem.split('-').next().expect("stamp");
            assert!(millis.parse::<i64>().is_ok(), "{name}");
            assert_eq!(fs::read(dir.join(name)).await?, b"\x89PNG");
        }
        let mut unique = urls.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), urls.len());

        let no_ext = store.save(None, b"raw").await?;
        assert!(!no_ext.contains('.'));

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
