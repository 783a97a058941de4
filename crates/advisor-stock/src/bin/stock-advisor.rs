//! Stock Advisor CLI
//!
//! Produces a structured trading recommendation for a symbol.
//!
//! # Usage
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."
//! export ALPHA_VANTAGE_API_KEY="..."
//!
//! cargo run --bin stock-advisor -p advisor-stock -- AAPL --language en
//! ```

use advisor_stock::{AdvisorConfig, AnalysisRequest, Language, StockAdvisor};
use clap::Parser;
use std::env;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "stock-advisor", about = "AI-driven stock recommendation")]
struct Cli {
    /// Ticker symbol to analyze (e.g. AAPL, GOOGL, 2330.TW)
    symbol: String,

    /// Reply language (en, zh-TW, zh-CN)
    #[arg(short, long, default_value = "zh-TW")]
    language: String,

    /// Model to use
    #[arg(short, long, default_value = "gpt-4o")]
    model: String,

    /// Maximum tool-calling rounds
    #[arg(long, default_value_t = 5)]
    max_rounds: usize,

    /// Overall analysis deadline in seconds
    #[arg(long, default_value_t = 120)]
    timeout: u64,

    /// Extra context for the model to weigh (e.g. "long-term holder")
    #[arg(short, long)]
    context: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn,advisor_stock=info".to_string()),
        )
        .init();

    let cli = Cli::parse();

    let config = AdvisorConfig {
        model: cli.model,
        max_tool_rounds: cli.max_rounds,
        analysis_timeout: Duration::from_secs(cli.timeout),
        ..AdvisorConfig::from_env()?
    };

    let advisor = StockAdvisor::new(config)?;

    let mut request =
        AnalysisRequest::new(cli.symbol).with_language(Language::from_code(&cli.language));
    if let Some(context) = cli.context {
        request = request.with_context(context);
    }
    let result = advisor.analyze(request).await;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
