use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// Disk-level failure: permission, missing directory, full disk.
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The bytes on disk are not valid JSON.
    #[error("corrupt data in {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Io { path: path.as_ref().display().to_string(), source }
    }

    pub fn corrupt(path: impl AsRef<std::path::Path>, source: serde_json::Error) -> Self {
        Self::Corrupt { path: path.as_ref().display().to_string(), source }
    }

    pub fn invalid_key(key: &str, reason: &str) -> Self {
        Self::InvalidKey(format!("{key:?} {reason}"))
    }
}
