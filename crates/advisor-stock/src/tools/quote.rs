//! Real-time quote data function

use super::{field_f64, field_u64, require_symbol};
use crate::api::AlphaVantageClient;
use advisor_llm::tools::schema;
use advisor_tools::Tool;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

/// `get_stock_quote`: current price, change, and volume for a symbol
pub struct QuoteTool {
    client: Arc<AlphaVantageClient>,
}

impl QuoteTool {
    pub fn new(client: Arc<AlphaVantageClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for QuoteTool {
    async fn execute(&self, params: Value) -> advisor_tools::Result<Value> {
        let symbol = require_symbol(&params)?;
        info!(symbol = %symbol, "Fetching quote");

        match self.client.global_quote(&symbol).await {
            Ok(data) => Ok(map_quote(&symbol, &data)),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Quote fetch failed");
                Ok(json!({ "error": e.to_string(), "symbol": symbol }))
            }
        }
    }

    fn name(&self) -> &str {
        "get_stock_quote"
    }

    fn description(&self) -> &str {
        "Get the real-time quote for a stock, including current price, change, and volume"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "symbol": schema::string("Ticker symbol, e.g. AAPL, GOOGL, MSFT"),
            }),
            vec!["symbol"],
        )
    }
}

/// Shape a GLOBAL_QUOTE response into the payload the model sees
fn map_quote(symbol: &str, data: &Value) -> Value {
    let Some(quote) = data.get("Global Quote").filter(|q| q.is_object()) else {
        return json!({
            "error": format!("No quote data found for {symbol}"),
            "symbol": symbol,
        });
    };

    let change_percent = quote
        .get("10. change percent")
        .and_then(Value::as_str)
        .unwrap_or("0%")
        .trim_end_matches('%');

    json!({
        "symbol": quote.get("01. symbol").and_then(Value::as_str).unwrap_or(symbol),
        "price": field_f64(quote, "05. price"),
        "change": field_f64(quote, "09. change"),
        "change_percent": change_percent,
        "volume": field_u64(quote, "06. volume"),
        "latest_trading_day": quote.get("07. latest trading day"),
        "previous_close": field_f64(quote, "08. previous close"),
        "open": field_f64(quote, "02. open"),
        "high": field_f64(quote, "03. high"),
        "low": field_f64(quote, "04. low"),
    })
}
