//! Chat-endpoint provider trait

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for model endpoints
///
/// The analysis pipeline works exclusively through this interface, so any
/// endpoint that can accept a transcript plus tool declarations and answer
/// with text or tool invocations can back it - including scripted fakes in
/// tests.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion for the given request
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Provider name (e.g. "openai")
    fn name(&self) -> &str;
}
