use std::{io::ErrorKind, path::{Path, PathBuf}};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Read and decode a JSON file.
///
/// A missing file is `Ok(None)`. Any other read failure is `ServiceError::Io`,
/// and undecodable contents are `ServiceError::Corrupt`.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ServiceError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ServiceError::io(path, e)),
    };
    let value = serde_json::from_slice(&bytes).map_err(|e| ServiceError::corrupt(path, e))?;
    Ok(Some(value))
}

/// Pretty-print `value` (2-space indent) and replace `path` with it.
///
/// The document is written to a uniquely named sibling temp file and then
/// renamed over the target, so readers see either the old or the new
/// document in full.
pub async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(value)?;
    write_via_temp(&temp_path_for(path), path, &data).await
}

/// Write `data` to `tmp` and rename it onto `path`. `tmp` is removed on any
/// failure, including a partial write.
async fn write_via_temp(tmp: &Path, path: &Path, data: &[u8]) -> Result<(), ServiceError> {
    if let Err(e) = fs::write(tmp, data).await {
        let _ = fs::remove_file(tmp).await;
        return Err(ServiceError::io(tmp, e));
    }
    if let Err(e) = fs::rename(tmp, path).await {
        let _ = fs::remove_file(tmp).await;
        return Err(ServiceError::io(path, e));
    }
    Ok(())
}

/// `.<name>.<uuid>.tmp` next to `path`. The leading dot keeps temp files out
/// of the valid key space.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4()))
}
