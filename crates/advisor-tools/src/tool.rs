//! Tool trait definition

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for data functions the model can invoke
///
/// Each tool provides a name, a description, and a JSON schema for its
/// input. The dispatcher advertises all registered tools to the model and
/// routes invocation requests back to `execute`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as JSON value. Tools that observe a domain-level failure
    /// (unknown symbol, upstream data gap) return `Ok` with an error payload
    /// the model can read; `Err` is reserved for execution failures.
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry and match the name advertised
    /// to the model
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the model decide when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;
}
