//! Error types for recommendation pipeline operations

use thiserror::Error;

/// Errors raised while producing a recommendation
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Rate limit exceeded for an upstream API
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Alpha Vantage API error
    #[error("Alpha Vantage error: {0}")]
    AlphaVantageError(String),

    /// Model completion error
    #[error("Completion error: {0}")]
    CompletionError(#[from] advisor_llm::LLMError),

    /// Prompt template rendering error
    #[error("Prompt error: {0}")]
    PromptError(String),

    /// The tool loop or final completion exceeded the configured deadline
    #[error("Analysis timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// No structured result could be recovered from the model output
    #[error("Could not extract a structured result from model output")]
    ExtractionFailed,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Convert AdvisorError into a tool execution error
impl From<AdvisorError> for advisor_tools::ToolError {
    fn from(err: AdvisorError) -> Self {
        advisor_tools::ToolError::ExecutionFailed(err.to_string())
    }
}
