//! Data functions the model may call
//!
//! Four tools back the analysis loop, each one a thin wrapper over an Alpha
//! Vantage endpoint. Tools return [`Ok`] with an `{"error", "symbol"}` payload
//! for domain-level failures (unknown symbol, upstream data gap, transport
//! problems) so the model can see what went wrong and carry on; [`Err`] is
//! reserved for malformed parameters.

mod company;
mod daily;
mod indicators;
mod quote;

pub use company::CompanyInfoTool;
pub use daily::DailyDataTool;
pub use indicators::TechnicalIndicatorsTool;
pub use quote::QuoteTool;

use crate::api::AlphaVantageClient;
use advisor_tools::ToolRegistry;
use serde_json::Value;
use std::sync::Arc;

/// Register all four data functions with the given registry
pub fn register_tools(registry: &ToolRegistry, client: Arc<AlphaVantageClient>) {
    registry.register(Arc::new(QuoteTool::new(client.clone())));
    registry.register(Arc::new(TechnicalIndicatorsTool::new(client.clone())));
    registry.register(Arc::new(DailyDataTool::new(client.clone())));
    registry.register(Arc::new(CompanyInfoTool::new(client)));
}

/// Extract the required `symbol` parameter from tool input
fn require_symbol(params: &Value) -> advisor_tools::Result<String> {
    params
        .get("symbol")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            advisor_tools::ToolError::InvalidParams("missing required parameter: symbol".into())
        })
}

/// Parse a numeric string field from an Alpha Vantage payload, defaulting to 0
fn field_f64(value: &Value, key: &str) -> f64 {
    value
        .get(key)
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0)
}

/// Parse an integer string field from an Alpha Vantage payload, defaulting to 0
fn field_u64(value: &Value, key: &str) -> u64 {
    value
        .get(key)
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_symbol() {
        assert_eq!(
            require_symbol(&json!({ "symbol": "AAPL" })).unwrap(),
            "AAPL"
        );
        assert!(require_symbol(&json!({})).is_err());
        assert!(require_symbol(&json!({ "symbol": 42 })).is_err());
    }

    #[test]
    fn test_numeric_field_parsing() {
        let v = json!({ "price": "123.45", "volume": "9000", "bad": "x" });
        assert_eq!(field_f64(&v, "price"), 123.45);
        assert_eq!(field_u64(&v, "volume"), 9000);
        assert_eq!(field_f64(&v, "bad"), 0.0);
        assert_eq!(field_u64(&v, "missing"), 0);
    }
}
