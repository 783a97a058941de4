//! Configuration for the recommendation pipeline

use crate::error::{AdvisorError, Result};
use std::time::Duration;

/// Configuration for [`StockAdvisor`](crate::StockAdvisor)
///
/// Sensible defaults match the free Alpha Vantage tier (5 requests per
/// minute) and the production model (`gpt-4o`).
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// OpenAI API key
    pub openai_api_key: String,

    /// Override for the OpenAI API base URL
    pub openai_api_base: Option<String>,

    /// Alpha Vantage API key
    pub alpha_vantage_api_key: String,

    /// Model to use for analysis
    pub model: String,

    /// Maximum number of tool-calling rounds before the final request is
    /// forced (prevents unbounded loops)
    pub max_tool_rounds: usize,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// Alpha Vantage requests per minute
    pub rate_limit_per_minute: u32,

    /// Timeout for individual data API requests
    pub request_timeout: Duration,

    /// Overall deadline for one analysis (tool loop plus final completion)
    pub analysis_timeout: Duration,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_api_base: None,
            alpha_vantage_api_key: String::new(),
            model: "gpt-4o".to_string(),
            max_tool_rounds: 5,
            max_tokens: 4096,
            temperature: 0.7,
            rate_limit_per_minute: 5,
            request_timeout: Duration::from_secs(30),
            analysis_timeout: Duration::from_secs(120),
        }
    }
}

impl AdvisorConfig {
    /// Create a new configuration builder
    pub fn builder() -> AdvisorConfigBuilder {
        AdvisorConfigBuilder::default()
    }

    /// Load configuration from environment variables
    ///
    /// Reads `OPENAI_API_KEY` and `ALPHA_VANTAGE_API_KEY` (both required)
    /// and `OPENAI_API_BASE` (optional).
    pub fn from_env() -> Result<Self> {
        let openai_api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            AdvisorError::ConfigError("OPENAI_API_KEY environment variable not set".to_string())
        })?;

        let alpha_vantage_api_key = std::env::var("ALPHA_VANTAGE_API_KEY").map_err(|_| {
            AdvisorError::ConfigError(
                "ALPHA_VANTAGE_API_KEY environment variable not set".to_string(),
            )
        })?;

        let config = Self {
            openai_api_key,
            openai_api_base: std::env::var("OPENAI_API_BASE").ok(),
            alpha_vantage_api_key,
            ..Default::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.is_empty() {
            return Err(AdvisorError::ConfigError(
                "OpenAI API key is required".to_string(),
            ));
        }

        if self.alpha_vantage_api_key.is_empty() {
            return Err(AdvisorError::ConfigError(
                "Alpha Vantage API key is required".to_string(),
            ));
        }

        if self.max_tool_rounds == 0 {
            return Err(AdvisorError::ConfigError(
                "max_tool_rounds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for AdvisorConfig
#[derive(Debug, Default)]
pub struct AdvisorConfigBuilder {
    openai_api_key: Option<String>,
    openai_api_base: Option<String>,
    alpha_vantage_api_key: Option<String>,
    model: Option<String>,
    max_tool_rounds: Option<usize>,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
    rate_limit_per_minute: Option<u32>,
    request_timeout: Option<Duration>,
    analysis_timeout: Option<Duration>,
}

impl AdvisorConfigBuilder {
    /// Set the OpenAI API key
    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    /// Set a custom OpenAI API base URL
    pub fn openai_api_base(mut self, base: impl Into<String>) -> Self {
        self.openai_api_base = Some(base.into());
        self
    }

    /// Set the Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the maximum number of tool-calling rounds
    pub fn max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = Some(rounds);
        self
    }

    /// Set max tokens per completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the Alpha Vantage rate limit (requests per minute)
    pub fn rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.rate_limit_per_minute = Some(limit);
        self
    }

    /// Set the data API request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the overall analysis deadline
    pub fn analysis_timeout(mut self, timeout: Duration) -> Self {
        self.analysis_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AdvisorConfig> {
        let defaults = AdvisorConfig::default();

        let config = AdvisorConfig {
            openai_api_key: self.openai_api_key.unwrap_or(defaults.openai_api_key),
            openai_api_base: self.openai_api_base,
            alpha_vantage_api_key: self
                .alpha_vantage_api_key
                .unwrap_or(defaults.alpha_vantage_api_key),
            model: self.model.unwrap_or(defaults.model),
            max_tool_rounds: self.max_tool_rounds.unwrap_or(defaults.max_tool_rounds),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            rate_limit_per_minute: self
                .rate_limit_per_minute
                .unwrap_or(defaults.rate_limit_per_minute),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            analysis_timeout: self.analysis_timeout.unwrap_or(defaults.analysis_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
