use crate::errors::ServiceError;
use async_trait::async_trait;
use serde_json::Value;

/// Storage for the single menu document edited from the admin page.
#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn load(&self) -> Result<Option<Value>, ServiceError>;
    async fn save(&self, menu: &Value) -> Result<(), ServiceError>;
}
