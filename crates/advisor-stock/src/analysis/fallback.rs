//! Fallback result synthesis
//!
//! When the model, the network, or extraction fails, the caller still gets a
//! complete result: a conservative HOLD with low confidence and a localized
//! note pointing at the likely cause.

use crate::analysis::result::{AnalysisKind, AnalysisResult, Recommendation};
use crate::prompts::{Language, fallback_key_factor, fallback_reasoning};
use chrono::Utc;

const FALLBACK_CONFIDENCE: f64 = 0.3;
const FALLBACK_RISK: f64 = 0.5;

/// Synthesize a conservative fallback result for a symbol
pub fn fallback_analysis(symbol: &str, language: Language) -> AnalysisResult {
    AnalysisResult {
        symbol: symbol.to_string(),
        kind: AnalysisKind::Fallback,
        timestamp: Utc::now(),
        confidence: FALLBACK_CONFIDENCE,
        recommendation: Recommendation::Hold,
        reasoning: fallback_reasoning(language).to_string(),
        key_factors: vec![fallback_key_factor(language).to_string()],
        price_target: None,
        stop_loss: None,
        entry_price: None,
        risk_score: Some(FALLBACK_RISK),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_conservative() {
        let result = fallback_analysis("AAPL", Language::English);
        assert_eq!(result.symbol, "AAPL");
        assert_eq!(result.kind, AnalysisKind::Fallback);
        assert_eq!(result.recommendation, Recommendation::Hold);
        assert_eq!(result.confidence, 0.3);
        assert_eq!(result.risk_score, Some(0.5));
        assert!(result.price_target.is_none());
        assert!(result.entry_price.is_none());
    }

    #[test]
    fn test_fallback_localized() {
        let zh = fallback_analysis("AAPL", Language::TraditionalChinese);
        assert!(zh.reasoning.contains("密鑰"));

        let en = fallback_analysis("AAPL", Language::English);
        assert!(en.reasoning.contains("OpenAI API key"));
        assert_eq!(en.key_factors.len(), 1);
    }
}
