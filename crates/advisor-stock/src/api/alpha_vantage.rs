//! Alpha Vantage API client
//!
//! Raw access to the Alpha Vantage query endpoint. Responses are returned as
//! `serde_json::Value`; the data-function tools shape them into the payloads
//! the model sees.

use crate::error::{AdvisorError, Result};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://www.alphavantage.co/query";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client
    ///
    /// # Arguments
    /// * `api_key` - Alpha Vantage API key
    /// * `rate_limit` - Maximum requests per minute (5 for the free tier)
    /// * `timeout` - Per-request timeout
    pub fn new(api_key: impl Into<String>, rate_limit: u32, timeout: Duration) -> Result<Self> {
        let quota =
            Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::new(5).unwrap()));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            rate_limiter,
        })
    }

    /// Get the global quote (current price data) for a symbol
    pub async fn global_quote(&self, symbol: &str) -> Result<serde_json::Value> {
        let mut params = HashMap::new();
        params.insert("function", "GLOBAL_QUOTE".to_string());
        params.insert("symbol", symbol.to_string());

        self.query(params).await
    }

    /// Get a technical indicator series for a symbol
    ///
    /// `indicator` is the Alpha Vantage function name (RSI, MACD, SMA, EMA).
    pub async fn technical_indicator(
        &self,
        symbol: &str,
        indicator: &str,
        interval: &str,
        time_period: u32,
    ) -> Result<serde_json::Value> {
        let mut params = HashMap::new();
        params.insert("function", indicator.to_string());
        params.insert("symbol", symbol.to_string());
        params.insert("interval", interval.to_string());
        params.insert("time_period", time_period.to_string());
        params.insert("series_type", "close".to_string());

        self.query(params).await
    }

    /// Get daily adjusted time series data for a symbol
    ///
    /// `outputsize` is "compact" (latest 100 days) or "full".
    pub async fn daily_series(&self, symbol: &str, outputsize: &str) -> Result<serde_json::Value> {
        let mut params = HashMap::new();
        params.insert("function", "TIME_SERIES_DAILY_ADJUSTED".to_string());
        params.insert("symbol", symbol.to_string());
        params.insert("outputsize", outputsize.to_string());

        self.query(params).await
    }

    /// Get company overview and fundamental data for a symbol
    pub async fn company_overview(&self, symbol: &str) -> Result<serde_json::Value> {
        let mut params = HashMap::new();
        params.insert("function", "OVERVIEW".to_string());
        params.insert("symbol", symbol.to_string());

        self.query(params).await
    }

    /// Issue a rate-limited query and check for API-level error markers
    async fn query(&self, mut params: HashMap<&str, String>) -> Result<serde_json::Value> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        params.insert("apikey", self.api_key.clone());

        debug!(function = %params.get("function").cloned().unwrap_or_default(), "Alpha Vantage request");

        let response = self.client.get(BASE_URL).query(&params).send().await?;

        if !response.status().is_success() {
            return Err(AdvisorError::AlphaVantageError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response.json().await?;

        // Alpha Vantage reports failures in the body with a 200 status
        if let Some(error) = data.get("Error Message") {
            return Err(AdvisorError::AlphaVantageError(error.to_string()));
        }

        if data.get("Note").is_some() {
            return Err(AdvisorError::RateLimitExceeded {
                provider: "Alpha Vantage".to_string(),
            });
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client =
            AlphaVantageClient::new("test_key", 5, Duration::from_secs(30)).expect("client");
        assert_eq!(client.api_key, "test_key");
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_global_quote() {
        let api_key = std::env::var("ALPHA_VANTAGE_API_KEY").unwrap();
        let client = AlphaVantageClient::new(api_key, 5, Duration::from_secs(30)).unwrap();
        let data = client.global_quote("AAPL").await.unwrap();
        assert!(data.get("Global Quote").is_some());
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_company_overview() {
        let api_key = std::env::var("ALPHA_VANTAGE_API_KEY").unwrap();
        let client = AlphaVantageClient::new(api_key, 5, Duration::from_secs(30)).unwrap();
        let data = client.company_overview("AAPL").await.unwrap();
        assert_eq!(data["Symbol"], "AAPL");
    }
}
