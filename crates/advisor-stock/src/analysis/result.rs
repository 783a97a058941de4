//! Structured analysis result types

use crate::prompts::Language;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trading recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    /// Parse a recommendation label, case-insensitively
    ///
    /// Anything unrecognized maps to `Hold`; a wrong label must never turn
    /// into a stronger signal than no signal.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "BUY" => Recommendation::Buy,
            "SELL" => Recommendation::Sell,
            _ => Recommendation::Hold,
        }
    }

    /// Get the wire label
    pub fn label(&self) -> &str {
        match self {
            Recommendation::Buy => "BUY",
            Recommendation::Sell => "SELL",
            Recommendation::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How an analysis result was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// Full pipeline: tool-calling loop plus structured extraction
    FunctionCalling,
    /// Synthesized fallback after an upstream failure
    Fallback,
}

/// A request for a stock recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Ticker symbol to analyze
    pub symbol: String,

    /// Language the reply should be written in
    #[serde(default)]
    pub language: Language,

    /// Extra caller-supplied context appended to the analysis prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl AnalysisRequest {
    /// Create a request for a symbol in the default language
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            language: Language::default(),
            context: None,
        }
    }

    /// Set the reply language
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Attach extra context for the model to weigh
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// A structured stock recommendation
///
/// Every field a caller needs is always present; optional price levels are
/// `None` when the model did not supply them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Ticker symbol the analysis is for
    pub symbol: String,

    /// How this result was produced
    pub kind: AnalysisKind,

    /// When the analysis completed
    pub timestamp: DateTime<Utc>,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// Trading recommendation
    pub recommendation: Recommendation,

    /// Narrative reasoning behind the recommendation
    pub reasoning: String,

    /// Key factors driving the decision
    pub key_factors: Vec<String>,

    /// Target price level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_target: Option<f64>,

    /// Stop-loss price level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,

    /// Suggested entry price (falls back to the price target when the model
    /// only supplied the latter)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_price: Option<f64>,

    /// Risk score in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
}

/// Clamp a score into the unit interval
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
