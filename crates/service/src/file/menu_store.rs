use std::{path::PathBuf, sync::Arc};

use serde_json::Value;
use tokio::fs;
use tracing::{error, info};

use crate::admin::menu_store::MenuStore;
use crate::errors::ServiceError;
use crate::storage::json_file;

/// The menu document, persisted as one pretty-printed JSON file.
#[derive(Clone, Debug)]
pub struct FileMenuStore {
    file_path: PathBuf,
}

impl FileMenuStore {
    /// Initialize the store; creates the parent directory but not the file,
    /// so an unsaved menu stays distinguishable from an empty one.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::io(parent, e))?;
        }
        Ok(Arc::new(Self { file_path }))
    }

    pub async fn load(&self) -> Result<Option<Value>, ServiceError> {
        json_file::read_json(&self.file_path).await.inspect_err(|e| {
            error!(path = %self.file_path.display(), error = %e, "menu read failed");
        })
    }

    pub async fn save(&self, menu: &Value) -> Result<(), ServiceError> {
        json_file::write_json_atomic(&self.file_path, menu).await.inspect_err(|e| {
            error!(path = %self.file_path.display(), error = %e, "menu write failed");
        })?;
        info!(path = %self.file_path.display(), "menu saved");
        Ok(())
    }
}

#[async_trait::async_trait]
impl MenuStore for FileMenuStore {
    async fn load(&self) -> Result<Option<Value>, ServiceError> { self.load().await }
    async fn save(&self, menu: &Value) -> Result<(), ServiceError> { self.save(menu).await }
}
