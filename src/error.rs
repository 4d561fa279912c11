//! Bachu error types
//!
//! Classification and dialogue never fail; these errors only come from the
//! edges that touch files: loading a knowledge base or a config.

use std::path::PathBuf;

/// Bachu error types
#[derive(Debug, thiserror::Error)]
pub enum BachuError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Knowledge base parsed but cannot drive a brain (no examples,
    /// unlabeled example, missing fallback responses, ...).
    #[error("invalid knowledge base: {0}")]
    InvalidKnowledgeBase(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for Bachu operations
pub type Result<T> = std::result::Result<T, BachuError>;
