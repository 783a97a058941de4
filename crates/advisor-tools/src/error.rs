//! Tool error types

use thiserror::Error;

/// Errors raised while executing a tool
#[derive(Error, Debug)]
pub enum ToolError {
    /// Tool input did not match the declared schema
    #[error("Invalid tool parameters: {0}")]
    InvalidParams(String),

    /// Tool execution failed (network, upstream API, etc.)
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for tool execution
pub type Result<T> = std::result::Result<T, ToolError>;
