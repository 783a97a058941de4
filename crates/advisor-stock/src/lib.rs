//! AI-driven stock recommendation pipeline
//!
//! This crate turns a stock symbol into a structured trading recommendation.
//! The pipeline has four stages:
//!
//! 1. **Prompt building** (`prompts`): localized analyst instructions for the
//!    requested symbol.
//! 2. **Tool dispatch** (`analysis::dispatch`): a bounded tool-calling loop
//!    against an OpenAI-style provider, routing data-function calls to the
//!    Alpha Vantage backed tools in `tools`.
//! 3. **Extraction** (`analysis::extract`): tolerant recovery of a structured
//!    result from whatever text the model produced.
//! 4. **Fallback** (`analysis::fallback`): a conservative HOLD result when
//!    everything upstream fails, so callers always get a valid answer.
//!
//! # Example
//!
//! ```ignore
//! use advisor_stock::{AdvisorConfig, AnalysisRequest, StockAdvisor};
//!
//! let config = AdvisorConfig::from_env()?;
//! let advisor = StockAdvisor::new(config)?;
//! let result = advisor.analyze(AnalysisRequest::new("AAPL")).await;
//! println!("{} -> {}", result.symbol, result.recommendation);
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod prompts;
pub mod tools;

pub use analysis::{AnalysisKind, AnalysisRequest, AnalysisResult, Recommendation, StockAdvisor};
pub use config::AdvisorConfig;
pub use error::{AdvisorError, Result};
pub use prompts::Language;
