use crate::errors::ServiceError;
use crate::storage::StorageKey;
use async_trait::async_trait;
use serde_json::Value;

/// Trait abstraction for key/value record storage.
/// `get` returns `Ok(None)` for a key that was never written.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &StorageKey) -> Result<Option<Value>, ServiceError>;
    async fn put(&self, key: &StorageKey, value: &Value) -> Result<(), ServiceError>;
    async fn list_keys(&self) -> Result<Vec<String>, ServiceError>;
}
