//! Technical indicator data function

use super::require_symbol;
use crate::api::AlphaVantageClient;
use advisor_llm::tools::schema;
use advisor_tools::Tool;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{info, warn};

const DEFAULT_INDICATOR: &str = "RSI";
const DEFAULT_INTERVAL: &str = "daily";
const DEFAULT_TIME_PERIOD: u32 = 14;
const RECENT_POINTS: usize = 5;

/// `get_stock_technical_indicators`: RSI, MACD, SMA, or EMA series
pub struct TechnicalIndicatorsTool {
    client: Arc<AlphaVantageClient>,
}

impl TechnicalIndicatorsTool {
    pub fn new(client: Arc<AlphaVantageClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TechnicalIndicatorsTool {
    async fn execute(&self, params: Value) -> advisor_tools::Result<Value> {
        let symbol = require_symbol(&params)?;
        let indicator = params
            .get("indicator")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_INDICATOR)
            .to_string();
        let interval = params
            .get("interval")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_INTERVAL)
            .to_string();
        let time_period = params
            .get("time_period")
            .and_then(Value::as_u64)
            .map_or(DEFAULT_TIME_PERIOD, |p| p as u32);

        info!(symbol = %symbol, indicator = %indicator, "Fetching technical indicator");

        match self
            .client
            .technical_indicator(&symbol, &indicator, &interval, time_period)
            .await
        {
            Ok(data) => Ok(map_indicator(&symbol, &indicator, &data)),
            Err(e) => {
                warn!(symbol = %symbol, indicator = %indicator, error = %e, "Indicator fetch failed");
                Ok(json!({
                    "error": e.to_string(),
                    "symbol": symbol,
                    "indicator": indicator,
                }))
            }
        }
    }

    fn name(&self) -> &str {
        "get_stock_technical_indicators"
    }

    fn description(&self) -> &str {
        "Get technical indicators for a stock, such as RSI, MACD, or moving averages"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "symbol": schema::string("Ticker symbol"),
                "indicator": schema::string_enum("Indicator type", &["RSI", "MACD", "SMA", "EMA"]),
                "interval": schema::string_enum("Sampling interval", &["daily", "weekly", "monthly"]),
                "time_period": schema::integer("Lookback period, e.g. 14 for a 14-day RSI"),
            }),
            vec!["symbol", "indicator"],
        )
    }
}

/// Shape an indicator response into the payload the model sees
///
/// Alpha Vantage keys the series under a function-specific name such as
/// "Technical Analysis: RSI"; we scan for it rather than hard-coding every
/// variant.
fn map_indicator(symbol: &str, indicator: &str, data: &Value) -> Value {
    let series = data
        .as_object()
        .and_then(|obj| {
            obj.iter()
                .find(|(key, _)| key.contains("Technical Analysis"))
        })
        .and_then(|(_, v)| v.as_object())
        .filter(|series| !series.is_empty());

    let Some(series) = series else {
        return json!({
            "error": format!("No {indicator} data found for {symbol}"),
            "symbol": symbol,
            "indicator": indicator,
        });
    };

    // Dates sort lexicographically, newest first after reversal
    let mut dates: Vec<&String> = series.keys().collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let mut recent_data = Map::new();
    for date in dates.iter().take(RECENT_POINTS) {
        recent_data.insert((*date).clone(), series[*date].clone());
    }

    let latest_date = dates[0];

    json!({
        "symbol": symbol,
        "indicator": indicator,
        "latest_date": latest_date,
        "latest_values": series[latest_date],
        "recent_data": recent_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rsi() -> Value {
        json!({
            "Meta Data": { "1: Symbol": "AAPL" },
            "Technical Analysis: RSI": {
                "2025-01-10": { "RSI": "61.2630" },
                "2025-01-09": { "RSI": "58.1045" },
                "2025-01-08": { "RSI": "55.9021" },
                "2025-01-07": { "RSI": "52.3377" },
                "2025-01-06": { "RSI": "49.8850" },
                "2025-01-03": { "RSI": "47.0112" }
            }
        })
    }

    #[test]
    fn test_map_indicator() {
        let payload = map_indicator("AAPL", "RSI", &sample_rsi());
        assert_eq!(payload["symbol"], "AAPL");
        assert_eq!(payload["latest_date"], "2025-01-10");
        assert_eq!(payload["latest_values"]["RSI"], "61.2630");

        // Only the most recent points are included
        let recent = payload["recent_data"].as_object().unwrap();
        assert_eq!(recent.len(), 5);
        assert!(recent.contains_key("2025-01-10"));
        assert!(!recent.contains_key("2025-01-03"));
    }

    #[test]
    fn test_map_indicator_no_series() {
        let payload = map_indicator("AAPL", "MACD", &json!({ "Meta Data": {} }));
        assert_eq!(payload["error"], "No MACD data found for AAPL");
        assert_eq!(payload["indicator"], "MACD");
    }
}
