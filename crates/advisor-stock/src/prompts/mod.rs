//! Analysis prompt templates
//!
//! Prompts are MiniJinja templates rendered per request. The analyst
//! instructions are written in Traditional Chinese with a per-language
//! directive line; the model answers in whichever language the caller
//! requested.

mod language;

pub use language::Language;

use crate::error::{AdvisorError, Result};
use minijinja::Environment;
use serde_json::json;

/// System prompt used for every completion
pub const SYSTEM_PROMPT: &str =
    "You are an expert financial analyst and trader. Provide accurate, data-driven analysis.";

/// Opening analyst instructions for a symbol
///
/// Sent as the first user message. Directs the model to pull real data
/// through the data functions before analyzing.
const ANALYSIS_TEMPLATE: &str = r"你是一位專業的股票技術分析師，請嚴格按照以下分析策略為股票代號 {{ symbol }} 進行深度分析。

重要提示：{{ lang_instruction }}

🎯 **完整分析策略**：

【第一步】獲取真實數據：
1. 獲取 {{ symbol }} 的即時報價和基本信息
2. 獲取 RSI 技術指標（重點）
3. 獲取最近的價格走勢數據
4. 如需要，獲取 MACD 和其他指標

【第二步】均線判斷策略：
- 短線操作：觀察 5 日均線
- 中期操作：觀察 10 日均線（核心）
- 波段操作：觀察 20 日均線

**均線核心法則**：
✅ 站上 10 日均線 → 偏多操作
✅ 回測不破 10 日均線 → 可續漲
❌ 跌破 10 日均線 → 減碼或觀望

【第三步】RSI 精準應用：
- RSI > 80：超買，觀察是否反轉下跌
- RSI < 20：超賣，反彈契機
- RSI ≈ 50：趨勢轉折觀察點
- RSI 跌破 50：需警惕趨勢轉弱

【第四步】避免假突破：
- 確認趨勢線與前波高低點
- 突破需伴隨大量，否則易失敗

【第五步】型態與量能確認：
- 三角收斂：紅 K 突破可追多，黑 K 跌破需避開
- 量價配合：價漲量增為健康訊號

💰 **必須提供精確數據**：
- 當前價格 vs 5/10/20 日均線位置
- RSI 具體數值及其含義
- 具體進場價位（基於均線和 RSI）
- 具體停損價位（前波低點或均線下緣）
- 具體目標價位（等幅上漲或阻力位）

請先調用函數獲取 {{ symbol }} 的真實數據，然後嚴格按照上述策略進行專業分析，提供具體的價位建議。";

/// Final structured-output request
///
/// Sent after the tool loop settles, asking the model to fold everything it
/// fetched into one JSON object.
const FINAL_TEMPLATE: &str = r#"現在基於上述獲取的 {{ symbol }} 真實股票數據，請完成最終分析：

🎯 **分析要求**：
1. **均線分析**：說明當前價格 vs 5/10/20 日均線的位置關係
2. **RSI 判斷**：提供具體 RSI 數值並解讀（>80 超買, <20 超賣, ~50 轉折）
3. **趨勢判斷**：依據均線 + RSI 判斷多空趨勢
4. **風險控管**：設定具體價位（進場、停損、目標），精確到小數點後 2 位

重要提示：{{ lang_instruction }}

請以 JSON 格式回覆，包含：
- "recommendation": "BUY", "SELL", "HOLD" 之一
- "confidence": 0-1 之間的數字
- "reasoning": 詳細推理（必須提及具體 RSI 數值、均線關係）
- "key_factors": 關鍵因素陣列（均線+RSI+量能+型態）
- "price_target": 具體目標價位（數值）
- "stop_loss": 具體停損價位（數值）
- "entry_price": 具體建議進場價位（數值）
- "risk_score": 0-1 風險評分"#;

/// Render the opening analyst instructions for a symbol
pub fn analysis_prompt(lang: Language, symbol: &str) -> Result<String> {
    render(
        ANALYSIS_TEMPLATE,
        &json!({ "symbol": symbol, "lang_instruction": lang.instruction() }),
    )
}

/// Render the final structured-output request
pub fn final_prompt(lang: Language, symbol: &str) -> Result<String> {
    render(
        FINAL_TEMPLATE,
        &json!({ "symbol": symbol, "lang_instruction": lang.instruction() }),
    )
}

/// Reasoning text attached to fallback results
pub fn fallback_reasoning(lang: Language) -> &'static str {
    match lang {
        Language::English => {
            "Unable to complete AI analysis. Please check your OpenAI API key configuration."
        }
        Language::TraditionalChinese => "無法完成AI分析，請檢查您的OpenAI API密鑰配置。",
        Language::SimplifiedChinese => "无法完成AI分析，请检查您的OpenAI API密钥配置。",
    }
}

/// Key-factor text attached to fallback results
pub fn fallback_key_factor(lang: Language) -> &'static str {
    match lang {
        Language::English => "AI analysis failed - API key issue",
        Language::TraditionalChinese => "AI分析失敗 - API密鑰問題",
        Language::SimplifiedChinese => "AI分析失败 - API密钥问题",
    }
}

fn render(template: &str, vars: &serde_json::Value) -> Result<String> {
    let env = Environment::new();
    let value = minijinja::value::Value::from_serialize(vars);

    env.render_str(template, value)
        .map_err(|e| AdvisorError::PromptError(e.to_string()))
}
