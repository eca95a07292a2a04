use std::{io::ErrorKind, path::PathBuf, sync::Arc};

use serde_json::Value;
use tokio::fs;
use tracing::{debug, error};

use crate::admin::kv_store::KvStore;
use crate::errors::ServiceError;
use crate::storage::{json_file, StorageKey};

/// Directory-backed key/value store.
///
/// Every key is one `<key>.json` file directly under `root`. There is no
/// in-memory index and no locking: the directory is the source of truth and
/// the last writer of a key wins.
#[derive(Clone, Debug)]
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    /// Open the store rooted at `root`, creating the directory if missing.
    pub async fn new<P: Into<PathBuf>>(root: P) -> Result<Arc<Self>, ServiceError> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| ServiceError::io(&root, e))?;
        Ok(Arc::new(Self { root }))
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    pub fn path_for(&self, key: &StorageKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    /// Read the value stored under `key`; `Ok(None)` if it was never written.
    pub async fn get(&self, key: &StorageKey) -> Result<Option<Value>, ServiceError> {
        let path = self.path_for(key);
        match json_file::read_json::<Value>(&path).await {
            Ok(value) => {
                debug!(%key, found = value.is_some(), "storage read");
                Ok(value)
            }
            Err(e) => {
                error!(%key, error = %e, "storage read failed");
                Err(e)
            }
        }
    }

    /// Create or fully replace the record for `key`.
    pub async fn put(&self, key: &StorageKey, value: &Value) -> Result<(), ServiceError> {
        let path = self.path_for(key);
        if let Err(e) = json_file::write_json_atomic(&path, value).await {
            error!(%key, error = %e, "storage write failed");
            return Err(e);
        }
        debug!(%key, "storage write");
        Ok(())
    }

    /// Keys of all records currently on disk, sorted. Files that do not map
    /// back to a valid key (temp files, foreign files) are skipped.
    pub async fn list_keys(&self) -> Result<Vec<String>, ServiceError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ServiceError::io(&self.root, e)),
        };
        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| ServiceError::io(&self.root, e))? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(stem) = name.strip_suffix(".json") else { continue };
            if StorageKey::parse(stem).is_ok() {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[async_trait::async_trait]
impl KvStore for FileKvStore {
    async fn get(&self, key: &StorageKey) -> Result<Option<Value>, ServiceError> { self.get(key).await }
    async fn put(&self, key: &StorageKey, value: &Value) -> Result<(), ServiceError> { self.put(key, value).await }
    async fn list_keys(&self) -> Result<Vec<String>, ServiceError> { self.list_keys().await }
}
