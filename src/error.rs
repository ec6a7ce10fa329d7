//! Error types for the store extensions
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for every store operation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Operation applied to a key holding the wrong value type
    #[error("wrong value type at key '{0}'")]
    WrongType(String),

    /// Caller supplied an argument the operation rejects
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Value could not be encoded for storage
    #[error("failed to encode value for key '{key}': {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },

    /// Stored payload could not be decoded back into the requested type
    #[error("failed to decode payload at key '{key}': {source}")]
    Deserialize {
        key: String,
        source: serde_json::Error,
    },

    /// Error reported by the Redis backend
    #[error("backend error: {0}")]
    Backend(#[from] redis::RedisError),
}

// == Result Type Alias ==
/// Convenience Result type for the store extensions.
pub type Result<T> = std::result::Result<T, StoreError>;
