//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Syncline
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SynclineError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote status error: {0}")]
    RemoteStatus(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SynclineError {
    /// Whether the error represents a remote-side failure (transport or
    /// non-success HTTP status) that sync operations log and swallow.
    pub fn is_remote_failure(&self) -> bool {
        matches!(self, Self::Network(_) | Self::RemoteStatus(_))
    }
}

/// Result type alias for Syncline operations
pub type Result<T> = std::result::Result<T, SynclineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failures_are_classified() {
        assert!(SynclineError::Network("timed out".into()).is_remote_failure());
        assert!(SynclineError::RemoteStatus("HTTP 503".into()).is_remote_failure());
        assert!(!SynclineError::InvalidInput("bad date".into()).is_remote_failure());
        assert!(!SynclineError::Database("locked".into()).is_remote_failure());
    }

    #[test]
    fn errors_serialize_with_tag_and_message() {
        let err = SynclineError::RemoteStatus("HTTP 404: not found".into());
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["type"], "RemoteStatus");
        assert_eq!(value["message"], "HTTP 404: not found");
    }
}
