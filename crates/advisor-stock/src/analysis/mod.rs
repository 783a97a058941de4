//! Recommendation pipeline
//!
//! [`StockAdvisor`] ties the stages together: prompt building, the tool
//! dispatch loop, extraction, and fallback synthesis. `analyze` is total:
//! whatever fails upstream, the caller gets a valid [`AnalysisResult`].

pub mod dispatch;
pub mod extract;
pub mod fallback;
pub mod result;

pub use dispatch::{DispatcherConfig, ToolDispatcher};
pub use result::{AnalysisKind, AnalysisRequest, AnalysisResult, Recommendation};

use crate::api::AlphaVantageClient;
use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, Result};
use crate::prompts::{self, Language};
use crate::tools::register_tools;
use advisor_llm::LLMProvider;
use advisor_llm::providers::{OpenAIConfig, OpenAIProvider};
use advisor_tools::ToolRegistry;
use std::sync::Arc;
use tracing::{info, warn};

/// Produces stock recommendations
pub struct StockAdvisor {
    dispatcher: ToolDispatcher,
    analysis_timeout: std::time::Duration,
}

impl StockAdvisor {
    /// Create an advisor backed by OpenAI and Alpha Vantage
    pub fn new(config: AdvisorConfig) -> Result<Self> {
        config.validate()?;

        let mut openai_config = OpenAIConfig::new(config.openai_api_key.clone());
        if let Some(base) = &config.openai_api_base {
            openai_config = openai_config.with_api_base(base.clone());
        }
        let provider = Arc::new(OpenAIProvider::with_config(openai_config)?);

        let client = Arc::new(AlphaVantageClient::new(
            config.alpha_vantage_api_key.clone(),
            config.rate_limit_per_minute,
            config.request_timeout,
        )?);

        let registry = Arc::new(ToolRegistry::new());
        register_tools(&registry, client);

        Ok(Self::with_provider(provider, registry, &config))
    }

    /// Create an advisor with a custom provider and tool registry
    ///
    /// Useful for local OpenAI-compatible endpoints and for tests.
    pub fn with_provider(
        provider: Arc<dyn LLMProvider>,
        registry: Arc<ToolRegistry>,
        config: &AdvisorConfig,
    ) -> Self {
        let dispatcher = ToolDispatcher::new(
            provider,
            registry,
            DispatcherConfig {
                model: config.model.clone(),
                max_tool_rounds: config.max_tool_rounds,
                max_tokens: config.max_tokens,
                temperature: config.temperature,
                system_prompt: prompts::SYSTEM_PROMPT.to_string(),
            },
        );

        Self {
            dispatcher,
            analysis_timeout: config.analysis_timeout,
        }
    }

    /// Produce a recommendation for a symbol
    ///
    /// Never fails: any upstream error is logged and replaced with a
    /// conservative fallback result.
    pub async fn analyze(&self, request: AnalysisRequest) -> AnalysisResult {
        let symbol = request.symbol.as_str();
        info!(symbol = %symbol, language = %request.language, "Starting analysis");

        match self.run_pipeline(&request).await {
            Ok(result) => {
                info!(
                    symbol = %symbol,
                    recommendation = %result.recommendation,
                    confidence = result.confidence,
                    "Analysis complete"
                );
                result
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Analysis failed, synthesizing fallback");
                fallback::fallback_analysis(symbol, request.language)
            }
        }
    }

    /// Produce a recommendation for a symbol in the given language
    pub async fn produce_recommendation(
        &self,
        symbol: impl Into<String>,
        language: Language,
    ) -> AnalysisResult {
        self.analyze(AnalysisRequest::new(symbol).with_language(language))
            .await
    }

    /// Run the full pipeline, propagating errors for `analyze` to absorb
    async fn run_pipeline(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let symbol = request.symbol.as_str();
        let language = request.language;
        validate_symbol(symbol)?;

        let mut opening = prompts::analysis_prompt(language, symbol)?;
        if let Some(context) = &request.context
            && !context.trim().is_empty()
        {
            opening.push_str("\n\nAdditional context from the caller:\n");
            opening.push_str(context);
        }
        let final_request = prompts::final_prompt(language, symbol)?;

        let response = tokio::time::timeout(
            self.analysis_timeout,
            self.dispatcher.run(opening, final_request),
        )
        .await
        .map_err(|_| AdvisorError::Timeout(self.analysis_timeout))??;

        extract::extract_analysis(symbol, &response).ok_or(AdvisorError::ExtractionFailed)
    }
}

/// Reject symbols that cannot possibly be tickers before spending a request
fn validate_symbol(symbol: &str) -> Result<()> {
    let valid = !symbol.is_empty()
        && symbol.len() <= 12
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(AdvisorError::InvalidSymbol(symbol.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_llm::{
        CompletionRequest, CompletionResponse, LLMError, Message, StopReason, TokenUsage,
    };
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedProvider {
        script: Mutex<VecDeque<advisor_llm::Result<CompletionResponse>>>,
    }

    impl ScriptedProvider {
        fn new(script: Vec<advisor_llm::Result<CompletionResponse>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> advisor_llm::Result<CompletionResponse> {
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(LLMError::RequestFailed("script exhausted".to_string())))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn text_response(text: &str) -> advisor_llm::Result<CompletionResponse> {
        Ok(CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage {
                input_tokens: 1,
                output_tokens: 1,
            },
        })
    }

    fn advisor(script: Vec<advisor_llm::Result<CompletionResponse>>) -> StockAdvisor {
        let config = AdvisorConfig {
            openai_api_key: "test".to_string(),
            alpha_vantage_api_key: "test".to_string(),
            ..Default::default()
        };
        StockAdvisor::with_provider(
            Arc::new(ScriptedProvider::new(script)),
            Arc::new(ToolRegistry::new()),
            &config,
        )
    }

    #[tokio::test]
    async fn test_analyze_returns_extracted_result() {
        let advisor = advisor(vec![
            text_response("Data looks strong."),
            text_response(r#"{"recommendation": "BUY", "confidence": 0.8, "reasoning": "Momentum."}"#),
        ]);

        let result = advisor.analyze(AnalysisRequest::new("AAPL")).await;
        assert_eq!(result.recommendation, Recommendation::Buy);
        assert_eq!(result.kind, AnalysisKind::FunctionCalling);
        assert_eq!(result.symbol, "AAPL");
    }

    #[tokio::test]
    async fn test_transport_failure_yields_fallback() {
        let advisor = advisor(vec![Err(LLMError::RequestFailed(
            "connection refused".to_string(),
        ))]);

        let result = advisor
            .analyze(AnalysisRequest::new("AAPL").with_language(Language::English))
            .await;

        assert_eq!(result.kind, AnalysisKind::Fallback);
        assert_eq!(result.recommendation, Recommendation::Hold);
        assert_eq!(result.confidence, 0.3);
        assert!(result.reasoning.contains("OpenAI API key"));
    }

    #[tokio::test]
    async fn test_unrecoverable_output_yields_fallback() {
        let advisor = advisor(vec![
            text_response("Thinking..."),
            text_response("{broken json that never closes"),
        ]);

        let result = advisor.analyze(AnalysisRequest::new("TSLA")).await;
        assert_eq!(result.kind, AnalysisKind::Fallback);
        assert_eq!(result.recommendation, Recommendation::Hold);
    }

    #[tokio::test]
    async fn test_invalid_symbol_yields_fallback_without_requests() {
        // Script is empty: a provider call would error differently, but the
        // symbol check fires first
        let advisor = advisor(vec![]);

        let result = advisor
            .analyze(AnalysisRequest::new("not a ticker!").with_language(Language::English))
            .await;

        assert_eq!(result.kind, AnalysisKind::Fallback);
    }

    #[test]
    fn test_validate_symbol() {
        assert!(validate_symbol("AAPL").is_ok());
        assert!(validate_symbol("2330.TW").is_ok());
        assert!(validate_symbol("BRK-B").is_ok());
        assert!(validate_symbol("").is_err());
        assert!(validate_symbol("not a ticker!").is_err());
        assert!(validate_symbol(&"A".repeat(20)).is_err());
    }

    #[tokio::test]
    async fn test_produce_recommendation_shorthand() {
        let advisor = advisor(vec![
            text_response("Done."),
            text_response(r#"{"recommendation": "SELL", "confidence": 0.6, "reasoning": "Weak."}"#),
        ]);

        let result = advisor
            .produce_recommendation("NVDA", Language::English)
            .await;
        assert_eq!(result.symbol, "NVDA");
        assert_eq!(result.recommendation, Recommendation::Sell);
    }

    #[tokio::test]
    async fn test_analyze_is_total_for_free_text() {
        // Free text without JSON still produces a structured result via the
        // heuristic path, not a fallback
        let advisor = advisor(vec![
            text_response("Here is what I found."),
            text_response("Momentum is strong, I would BUY on dips."),
        ]);

        let result = advisor.analyze(AnalysisRequest::new("MSFT")).await;
        assert_eq!(result.kind, AnalysisKind::FunctionCalling);
        assert_eq!(result.recommendation, Recommendation::Buy);
        assert_eq!(result.confidence, 0.5);
    }
}
