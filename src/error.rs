//! Error types for valve-stream
//!
//! Running out of data is never an error: data sources return
//! [`Pull`](crate::Pull) markers and terminal operations return `Option`.
//! The errors here cover bounded materialisation and configuration only.

/// Main error type for valve-stream operations
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// A bounded materialisation pulled more elements than allowed
    #[error("Buffer capacity exceeded: more than {limit} elements")]
    CapacityExceeded { limit: usize },
    /// A configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// A configuration document could not be parsed
    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for valve-stream operations
pub type StreamResult<T> = Result<T, StreamError>;
