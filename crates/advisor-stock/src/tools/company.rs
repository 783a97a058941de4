//! Company overview data function

use super::require_symbol;
use crate::api::AlphaVantageClient;
use advisor_llm::tools::schema;
use advisor_tools::Tool;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

const DESCRIPTION_LIMIT: usize = 200;

/// `search_company_info`: company fundamentals from the OVERVIEW endpoint
pub struct CompanyInfoTool {
    client: Arc<AlphaVantageClient>,
}

impl CompanyInfoTool {
    pub fn new(client: Arc<AlphaVantageClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CompanyInfoTool {
    async fn execute(&self, params: Value) -> advisor_tools::Result<Value> {
        let symbol = require_symbol(&params)?;
        info!(symbol = %symbol, "Fetching company info");

        match self.client.company_overview(&symbol).await {
            Ok(data) => Ok(map_company(&symbol, &data)),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Company info fetch failed");
                Ok(json!({ "error": e.to_string(), "symbol": symbol }))
            }
        }
    }

    fn name(&self) -> &str {
        "search_company_info"
    }

    fn description(&self) -> &str {
        "Get basic company information, including name, industry, market cap, and P/E ratio"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "symbol": schema::string("Ticker symbol"),
            }),
            vec!["symbol"],
        )
    }
}

/// Shape an OVERVIEW response into the payload the model sees
fn map_company(symbol: &str, data: &Value) -> Value {
    if data.get("Symbol").is_none() {
        return json!({
            "error": format!("No company info found for {symbol}"),
            "symbol": symbol,
        });
    }

    json!({
        "symbol": data.get("Symbol"),
        "name": data.get("Name"),
        "description": truncate_description(data.get("Description").and_then(Value::as_str)),
        "industry": data.get("Industry"),
        "sector": data.get("Sector"),
        "market_cap": data.get("MarketCapitalization"),
        "pe_ratio": data.get("PERatio"),
        "dividend_yield": data.get("DividendYield"),
        "52_week_high": data.get("52WeekHigh"),
        "52_week_low": data.get("52WeekLow"),
        "analyst_target_price": data.get("AnalystTargetPrice"),
        "eps": data.get("EPS"),
        "beta": data.get("Beta"),
    })
}

/// Truncate the company description to keep the transcript small
fn truncate_description(description: Option<&str>) -> String {
    match description {
        Some(text) if !text.is_empty() => {
            let truncated: String = text.chars().take(DESCRIPTION_LIMIT).collect();
            format!("{truncated}...")
        }
        _ => String::new(),
    }
}
