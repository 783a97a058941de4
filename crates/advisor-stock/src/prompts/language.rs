//! Reply language selection for analysis prompts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the advisor can answer in
///
/// Traditional Chinese is the baseline: unknown codes fall back to it, and
/// every template carries a Traditional Chinese rendition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// English
    English,
    /// Traditional Chinese
    #[default]
    TraditionalChinese,
    /// Simplified Chinese
    SimplifiedChinese,
}

impl Language {
    /// Get the language code
    pub fn code(&self) -> &str {
        match self {
            Language::English => "en",
            Language::TraditionalChinese => "zh-TW",
            Language::SimplifiedChinese => "zh-CN",
        }
    }

    /// Parse from a language code or common name
    ///
    /// Unknown codes map to the Traditional Chinese baseline.
    pub fn from_code(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "en" | "english" => Language::English,
            "zh-cn" | "zh-hans" => Language::SimplifiedChinese,
            _ => Language::TraditionalChinese,
        }
    }

    /// Instruction line injected into prompts to pin the reply language
    pub fn instruction(&self) -> &str {
        match self {
            Language::English => "Please respond in English.",
            Language::TraditionalChinese => "請用繁體中文回答。",
            Language::SimplifiedChinese => "请用简体中文回答。",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<&str> for Language {
    fn from(s: &str) -> Self {
        Language::from_code(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("en"), Language::English);
        assert_eq!(Language::from_code("English"), Language::English);
        assert_eq!(Language::from_code("zh-CN"), Language::SimplifiedChinese);
        assert_eq!(Language::from_code("zh-Hans"), Language::SimplifiedChinese);
        assert_eq!(Language::from_code("zh"), Language::TraditionalChinese);
        assert_eq!(Language::from_code("zh-TW"), Language::TraditionalChinese);
    }

    #[test]
    fn test_unknown_code_falls_back_to_traditional() {
        assert_eq!(Language::from_code("ja"), Language::TraditionalChinese);
        assert_eq!(Language::from_code(""), Language::TraditionalChinese);
    }

    #[test]
    fn test_default() {
        assert_eq!(Language::default(), Language::TraditionalChinese);
    }

    #[test]
    fn test_codes_round_trip() {
        for lang in [
            Language::English,
            Language::TraditionalChinese,
            Language::SimplifiedChinese,
        ] {
            assert_eq!(Language::from_code(lang.code()), lang);
        }
    }
}
