//! Daily price history data function

use super::{field_f64, field_u64, require_symbol};
use crate::api::AlphaVantageClient;
use advisor_llm::tools::schema;
use advisor_tools::Tool;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

const DEFAULT_OUTPUTSIZE: &str = "compact";
const MAX_DAYS: usize = 30;

/// `get_stock_daily_data`: recent daily OHLCV history
pub struct DailyDataTool {
    client: Arc<AlphaVantageClient>,
}

impl DailyDataTool {
    pub fn new(client: Arc<AlphaVantageClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for DailyDataTool {
    async fn execute(&self, params: Value) -> advisor_tools::Result<Value> {
        let symbol = require_symbol(&params)?;
        let outputsize = params
            .get("outputsize")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_OUTPUTSIZE)
            .to_string();

        info!(symbol = %symbol, outputsize = %outputsize, "Fetching daily data");

        match self.client.daily_series(&symbol, &outputsize).await {
            Ok(data) => Ok(map_daily(&symbol, &data)),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Daily data fetch failed");
                Ok(json!({ "error": e.to_string(), "symbol": symbol }))
            }
        }
    }

    fn name(&self) -> &str {
        "get_stock_daily_data"
    }

    fn description(&self) -> &str {
        "Get daily historical price data for a stock, including open, high, low, close, and volume"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "symbol": schema::string("Ticker symbol"),
                "outputsize": schema::string_enum("Amount of history to fetch", &["compact", "full"]),
            }),
            vec!["symbol"],
        )
    }
}

/// Shape a TIME_SERIES_DAILY_ADJUSTED response into the payload the model sees
///
/// Only the most recent 30 trading days are forwarded to keep the transcript
/// small.
fn map_daily(symbol: &str, data: &Value) -> Value {
    let Some(series) = data
        .get("Time Series (Daily)")
        .and_then(Value::as_object)
        .filter(|s| !s.is_empty())
    else {
        return json!({
            "error": format!("No daily data found for {symbol}"),
            "symbol": symbol,
        });
    };

    let mut dates: Vec<&String> = series.keys().collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let daily_data: Vec<Value> = dates
        .iter()
        .take(MAX_DAYS)
        .map(|date| {
            let day = &series[date.as_str()];
            json!({
                "date": date,
                "open": field_f64(day, "1. open"),
                "high": field_f64(day, "2. high"),
                "low": field_f64(day, "3. low"),
                "close": field_f64(day, "4. close"),
                "volume": field_u64(day, "6. volume"),
            })
        })
        .collect();

    json!({
        "symbol": symbol,
        "latest_date": daily_data.first().map(|d| d["date"].clone()),
        "data_points": daily_data.len(),
        "data": daily_data,
    })
}
