//! Tool-calling dispatch loop
//!
//! Drives the conversation with the model:
//! 1. Send the analyst instructions with the data functions attached.
//! 2. While the model requests tools (up to `max_tool_rounds`), execute the
//!    calls sequentially, feed the results back, and ask again.
//! 3. Send the final structured-output request, without tools, and return
//!    the model's text.
//!
//! Tool failures never abort the loop: an unknown tool name or a failed
//! execution becomes an error entry in the transcript that the model can
//! read and route around.

use crate::error::Result;
use crate::prompts::SYSTEM_PROMPT;
use advisor_llm::{
    CompletionRequest, ContentBlock, LLMProvider, Message, StopReason, ToolDefinition,
};
use advisor_tools::ToolRegistry;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for the dispatch loop
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Model to use
    pub model: String,

    /// Maximum tool-calling rounds before the final request is forced
    pub max_tool_rounds: usize,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// System prompt
    pub system_prompt: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            max_tool_rounds: 5,
            max_tokens: 4096,
            temperature: 0.7,
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Runs the tool-calling loop against a provider and a tool registry
pub struct ToolDispatcher {
    provider: Arc<dyn LLMProvider>,
    registry: Arc<ToolRegistry>,
    config: DispatcherConfig,
}

impl ToolDispatcher {
    /// Create a new dispatcher
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        registry: Arc<ToolRegistry>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            provider,
            registry,
            config,
        }
    }

    /// Run the loop: opening instructions, tool rounds, final request
    ///
    /// Returns the raw text of the final completion.
    pub async fn run(&self, opening: String, final_request: String) -> Result<String> {
        let mut conversation = vec![Message::user(opening)];
        let tools = self.tool_definitions();
        let mut round = 0;

        loop {
            round += 1;
            info!(
                round = round,
                max_rounds = self.config.max_tool_rounds,
                tool_count = tools.len(),
                "Analysis round started"
            );

            let mut builder = CompletionRequest::builder(&self.config.model)
                .messages(conversation.clone())
                .system(self.config.system_prompt.clone())
                .max_tokens(self.config.max_tokens)
                .temperature(self.config.temperature);

            if !tools.is_empty() {
                builder = builder.tools(tools.clone());
            }

            let response = self.provider.complete(builder.build()).await?;

            info!(
                stop_reason = ?response.stop_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "Model response received"
            );

            let requested_tools = response.message.has_tool_uses();
            conversation.push(response.message.clone());

            if response.stop_reason == StopReason::ToolUse && requested_tools {
                let results = self.execute_tools(&response.message).await;
                for result in results {
                    conversation.push(result);
                }

                if round >= self.config.max_tool_rounds {
                    warn!(
                        max_rounds = self.config.max_tool_rounds,
                        "Tool round limit reached, forcing final request"
                    );
                    break;
                }

                continue;
            }

            if response.stop_reason == StopReason::MaxTokens {
                warn!("Model response truncated by token limit");
            }

            break;
        }

        // Final structured-output request, with tools withdrawn so the model
        // has to answer
        conversation.push(Message::user(final_request));

        let request = CompletionRequest::builder(&self.config.model)
            .messages(conversation)
            .system(self.config.system_prompt.clone())
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build();

        let response = self.provider.complete(request).await?;

        info!(
            output_tokens = response.usage.output_tokens,
            "Final analysis received"
        );

        Ok(response.message.text().unwrap_or_default().to_string())
    }

    /// Build tool declarations from the registry
    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.registry
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Execute the tool calls in an assistant message, sequentially
    ///
    /// Every requested call gets exactly one result message, even on failure,
    /// so the transcript stays well-formed for the next completion.
    async fn execute_tools(&self, message: &Message) -> Vec<Message> {
        let mut results = Vec::new();
        let tool_uses = message.tool_uses();
        info!(tool_count = tool_uses.len(), "Executing requested tools");

        for tool_use in tool_uses {
            let ContentBlock::ToolUse { id, name, input } = tool_use else {
                continue;
            };

            let input_preview: String = input.to_string().chars().take(500).collect();
            info!(
                tool_name = %name,
                tool_id = %id,
                input_preview = %input_preview,
                "Executing tool"
            );

            let Some(tool) = self.registry.get(name) else {
                warn!(tool_name = %name, "Model requested an unknown tool");
                results.push(Message::tool_error(
                    id.clone(),
                    format!("Unknown tool: {name}"),
                ));
                continue;
            };

            let start = std::time::Instant::now();
            match tool.execute(input.clone()).await {
                Ok(result) => {
                    let result_str =
                        serde_json::to_string(&result).unwrap_or_else(|_| result.to_string());
                    debug!(
                        tool_name = %name,
                        duration_ms = start.elapsed().as_millis() as u64,
                        result_length = result_str.len(),
                        "Tool execution succeeded"
                    );
                    results.push(Message::tool_result(id.clone(), result_str));
                }
                Err(e) => {
                    warn!(
                        tool_name = %name,
                        duration_ms = start.elapsed().as_millis() as u64,
                        error = %e,
                        "Tool execution failed"
                    );
                    results.push(Message::tool_error(id.clone(), format!("Error: {e}")));
                }
            }
        }

        results
    }
}
