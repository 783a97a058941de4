//! Chat-endpoint abstraction for stock-advisor-rs
//!
//! This crate defines the transcript and completion types the analysis
//! pipeline speaks, independent of any concrete model vendor:
//!
//! - Role-tagged transcript messages with tool-use and tool-result blocks
//! - Completion request/response types
//! - Tool declarations (name, description, JSON-schema parameters)
//! - The [`LLMProvider`] trait, plus an OpenAI implementation behind the
//!   `openai` feature flag

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod tools;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::LLMProvider;
pub use tools::ToolDefinition;

// Provider implementations (feature-gated)
#[cfg(feature = "openai")]
pub mod providers;
