use thiserror::Error;

use crate::implementations::config::ConfigError;

/// Custom error types for the claimcheck pipeline
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request error: {0}")]
    Request(String),

    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse response from {source_name}: {message}")]
    Parse { source_name: String, message: String },

    #[error("Embedding backend error: {0}")]
    Embedding(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type specific to claimcheck operations
pub type CheckResult<T> = Result<T, CheckError>;

/// Recoverable vs. non-recoverable errors
pub trait RecoverableError {
    fn is_recoverable(&self) -> bool;
    fn recovery_strategy(&self) -> Option<String>;
}

impl RecoverableError for CheckError {
    fn is_recoverable(&self) -> bool {
        match self {
            CheckError::Network(_) => true,
            CheckError::Http { status, .. } => matches!(status, 502 | 503 | 504),
            _ => false,
        }
    }

    fn recovery_strategy(&self) -> Option<String> {
        match self {
            CheckError::Network(_) => Some("retry the request after a short delay".to_string()),
            CheckError::Http { status, .. } if self.is_recoverable() => {
                Some(format!("upstream returned {}, retry once", status))
            }
            CheckError::InvalidInput(_) => {
                Some("provide a claim of at least a few characters".to_string())
            }
            CheckError::Config(_) => Some("check the configuration file and environment".to_string()),
            _ => None,
        }
    }
}
