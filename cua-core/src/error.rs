use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum CuaError {
    /// The shared browser page was used before startup attached it.
    ///
    /// This is a startup-ordering bug, not a transient failure; callers must
    /// not retry it.
    #[error("Browser session not started")]
    SessionNotStarted,

    #[error("Session error: {0}")]
    Session(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Sampling error: {0}")]
    Sampling(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl CuaError {
    /// Whether the error signals a broken process invariant rather than a
    /// failed call.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CuaError::SessionNotStarted)
    }

    /// Whether the error was caused by the caller's arguments.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CuaError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, CuaError>;
