#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage unavailable for key '{key}': {source}")]
    StorageUnavailable {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Access denied: {0}")]
    CapabilityDenied(String),
}

impl DictError {
    pub fn storage(key: &str, source: std::io::Error) -> Self {
        DictError::StorageUnavailable {
            key: key.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DictError>;
