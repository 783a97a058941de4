//! Tolerant extraction of structured results from model output
//!
//! Models rarely return clean JSON: the object is often wrapped in prose,
//! markdown fences, or trailing commentary. Extraction runs a chain of
//! progressively more forgiving strategies:
//!
//! 1. Parse the whole (trimmed) response as JSON.
//! 2. Scan for the first balanced `{...}` group and parse that.
//! 3. Give up on JSON and recover a coarse result from the raw text.
//!
//! Only a response with a leading `{` that still fails to yield valid JSON
//! is treated as unrecoverable; the caller synthesizes a fallback then.

use crate::analysis::result::{AnalysisKind, AnalysisResult, Recommendation, clamp_unit};
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

const HEURISTIC_CONFIDENCE: f64 = 0.5;
const HEURISTIC_RISK: f64 = 0.5;
const HEURISTIC_REASONING_CHARS: usize = 200;
const DEFAULT_REASONING: &str = "AI analysis performed";

/// Extract a structured result from raw model output
///
/// Returns `None` only when the response leads with `{` but no valid JSON
/// object can be recovered from it.
pub fn extract_analysis(symbol: &str, response: &str) -> Option<AnalysisResult> {
    let payload = extract_payload(response)?;
    Some(build_result(symbol, &payload))
}

/// Recover a JSON payload from the response text
fn extract_payload(response: &str) -> Option<Value> {
    let trimmed = response.trim();

    if trimmed.starts_with('{') {
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            debug!("Parsed response as clean JSON");
            return Some(value);
        }

        // Commentary after the object breaks a direct parse; retry with the
        // first balanced group
        match first_json_object(trimmed).and_then(|s| serde_json::from_str::<Value>(s).ok()) {
            Some(value) => {
                debug!("Recovered leading JSON object from response");
                Some(value)
            }
            None => {
                warn!("Response leads with '{{' but contains no valid JSON object");
                None
            }
        }
    } else if response.contains('{') {
        match first_json_object(response).and_then(|s| serde_json::from_str::<Value>(s).ok()) {
            Some(value) => {
                debug!("Extracted embedded JSON object from response");
                Some(value)
            }
            None => {
                warn!("Could not extract valid JSON, using heuristic recovery");
                Some(heuristic_payload(response))
            }
        }
    } else {
        warn!("No JSON found in response, using heuristic recovery");
        Some(heuristic_payload(response))
    }
}

/// Find the first balanced `{...}` group in the text
///
/// Counts brace depth from the first `{`. Braces inside string literals are
/// not special-cased; model output that trips on that also fails the direct
/// parse and lands in the heuristic path.
fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;

    for (offset, ch) in text[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Build a coarse payload from free-form text
///
/// A BUY without any SELL reads as a buy signal; any SELL mention wins
/// otherwise, since a sell call is the costlier one to miss.
fn heuristic_payload(response: &str) -> Value {
    let upper = response.to_uppercase();
    let recommendation = if upper.contains("BUY") && !upper.contains("SELL") {
        "BUY"
    } else if upper.contains("SELL") {
        "SELL"
    } else {
        "HOLD"
    };

    let reasoning: String = response.chars().take(HEURISTIC_REASONING_CHARS).collect();

    serde_json::json!({
        "confidence": HEURISTIC_CONFIDENCE,
        "recommendation": recommendation,
        "reasoning": reasoning,
        "key_factors": [],
        "risk_score": HEURISTIC_RISK,
    })
}

/// Coerce a payload into an [`AnalysisResult`]
///
/// Missing or malformed fields degrade to safe defaults instead of failing.
fn build_result(symbol: &str, payload: &Value) -> AnalysisResult {
    let confidence = payload
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(HEURISTIC_CONFIDENCE);

    let recommendation = payload
        .get("recommendation")
        .and_then(Value::as_str)
        .map_or(Recommendation::Hold, Recommendation::from_label);

    let reasoning = payload
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_REASONING)
        .to_string();

    let key_factors = payload
        .get("key_factors")
        .and_then(Value::as_array)
        .map(|factors| {
            factors
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let price_target = payload.get("price_target").and_then(Value::as_f64);

    // Older model outputs carried the entry price in price_target only
    let entry_price = payload
        .get("entry_price")
        .and_then(Value::as_f64)
        .or(price_target);

    AnalysisResult {
        symbol: symbol.to_string(),
        kind: AnalysisKind::FunctionCalling,
        timestamp: Utc::now(),
        confidence: clamp_unit(confidence),
        recommendation,
        reasoning,
        key_factors,
        price_target,
        stop_loss: payload.get("stop_loss").and_then(Value::as_f64),
        entry_price,
        risk_score: payload
            .get("risk_score")
            .and_then(Value::as_f64)
            .map(clamp_unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_json_is_used_directly() {
        let response = r#"{
            "recommendation": "BUY",
            "confidence": 0.8,
            "reasoning": "RSI recovering from oversold, price above the 10-day average.",
            "key_factors": ["RSI 35 -> 45", "Above 10-day MA"],
            "price_target": 160.0,
            "stop_loss": 140.0,
            "entry_price": 150.0,
            "risk_score": 0.3
        }"#;

        let result = extract_analysis("AAPL", response).unwrap();
        assert_eq!(result.recommendation, Recommendation::Buy);
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.key_factors.len(), 2);
        assert_eq!(result.entry_price, Some(150.0));
        assert_eq!(result.kind, AnalysisKind::FunctionCalling);
    }

    #[test]
    fn test_first_balanced_group_wins_over_trailing_prose() {
        let response =
            r#"{"recommendation":"SELL","confidence":0.4} some extra commentary"#;
        let result = extract_analysis("AAPL", response).unwrap();
        assert_eq!(result.recommendation, Recommendation::Sell);
        assert_eq!(result.confidence, 0.4);
    }

    #[test]
    fn test_first_of_two_sibling_objects_wins() {
        let response = concat!(
            r#"Initial read: {"recommendation":"SELL","confidence":0.4} "#,
            r#"but on reflection {"recommendation":"BUY","confidence":0.9}"#,
        );
        let result = extract_analysis("AAPL", response).unwrap();
        assert_eq!(result.recommendation, Recommendation::Sell);
        assert_eq!(result.confidence, 0.4);
    }

    #[test]
    fn test_json_embedded_in_prose() {
        let response = "Here is my analysis:\n```json\n{\"recommendation\": \"HOLD\", \"confidence\": 0.6, \"reasoning\": \"Mixed signals.\"}\n```\nLet me know if you need more.";
        let result = extract_analysis("TSLA", response).unwrap();
        assert_eq!(result.recommendation, Recommendation::Hold);
        assert_eq!(result.confidence, 0.6);
        assert_eq!(result.reasoning, "Mixed signals.");
    }

    #[test]
    fn test_nested_objects_stay_balanced() {
        let response = r#"Analysis: {"recommendation": "BUY", "levels": {"support": 140, "resistance": 155}, "confidence": 0.7} done"#;
        let result = extract_analysis("MSFT", response).unwrap();
        assert_eq!(result.recommendation, Recommendation::Buy);
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn test_heuristic_buy_without_sell() {
        let response = "Strong momentum, I would BUY this stock on the next dip.";
        let result = extract_analysis("AAPL", response).unwrap();
        assert_eq!(result.recommendation, Recommendation::Buy);
        assert_eq!(result.confidence, 0.5);
        assert!(result.key_factors.is_empty());
        assert!(result.reasoning.starts_with("Strong momentum"));
    }

    #[test]
    fn test_heuristic_sell_outranks_buy() {
        let response = "Some would BUY here, but the breakdown says SELL.";
        let result = extract_analysis("AAPL", response).unwrap();
        assert_eq!(result.recommendation, Recommendation::Sell);
    }

    #[test]
    fn test_heuristic_neither_signal_holds() {
        let response = "The picture is unclear; wait for confirmation.";
        let result = extract_analysis("AAPL", response).unwrap();
        assert_eq!(result.recommendation, Recommendation::Hold);
        assert_eq!(result.risk_score, Some(0.5));
    }

    #[test]
    fn test_heuristic_reasoning_truncated() {
        let response = "n".repeat(500);
        let result = extract_analysis("AAPL", &response).unwrap();
        assert_eq!(result.reasoning.chars().count(), 200);
    }

    #[test]
    fn test_leading_brace_garbage_is_unrecoverable() {
        assert!(extract_analysis("AAPL", "{not json at all").is_none());
    }

    #[test]
    fn test_entry_price_falls_back_to_target() {
        let response = r#"{"recommendation": "BUY", "price_target": 160.0}"#;
        let result = extract_analysis("AAPL", response).unwrap();
        assert_eq!(result.entry_price, Some(160.0));
        assert_eq!(result.price_target, Some(160.0));
    }

    #[test]
    fn test_explicit_entry_price_preferred() {
        let response = r#"{"recommendation": "BUY", "price_target": 160.0, "entry_price": 150.0}"#;
        let result = extract_analysis("AAPL", response).unwrap();
        assert_eq!(result.entry_price, Some(150.0));
    }

    #[test]
    fn test_scores_clamped_to_unit_interval() {
        let response = r#"{"recommendation": "BUY", "confidence": 1.7, "risk_score": -0.3}"#;
        let result = extract_analysis("AAPL", response).unwrap();
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.risk_score, Some(0.0));
    }

    #[test]
    fn test_unknown_recommendation_defaults_to_hold() {
        let response = r#"{"recommendation": "ACCUMULATE", "confidence": 0.9}"#;
        let result = extract_analysis("AAPL", response).unwrap();
        assert_eq!(result.recommendation, Recommendation::Hold);
    }

    #[test]
    fn test_idempotent_on_clean_json() {
        let response = r#"{"recommendation": "SELL", "confidence": 0.45, "reasoning": "Breakdown."}"#;
        let first = extract_analysis("AAPL", response).unwrap();
        let second = extract_analysis("AAPL", response).unwrap();
        assert_eq!(first.recommendation, second.recommendation);
        assert_eq!(first.confidence, second.confidence);
        assert_eq!(first.reasoning, second.reasoning);
    }
}
