// file: src/error.rs
// version: 1.0.0
// guid: 3f9c2a71-8d4e-4b06-9a52-c1e7d80f4b21

use thiserror::Error;

/// Result type alias for the bootstrap orchestrator
pub type Result<T> = std::result::Result<T, BootstrapError>;

/// Error types for the bootstrap pipeline
///
/// Every error is fatal: there are no retries and no rollback once the
/// pipeline has passed the confirmation gate.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// A requirement was not met before any destructive action
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// An external tool exited non-zero or never produced its result
    #[error("external tool failed: {0}")]
    Tool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl BootstrapError {
    /// Create a new precondition error
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Create a new external-tool error
    pub fn tool(msg: impl Into<String>) -> Self {
        Self::Tool(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
