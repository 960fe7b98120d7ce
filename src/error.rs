use thiserror::Error;

#[derive(Debug, Error)]
pub enum FigtrimError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
