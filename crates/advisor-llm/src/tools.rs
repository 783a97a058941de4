//! Tool declarations offered to the model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool the model may invoke: name, description, and the JSON schema of
/// its input parameters. The name must match the tool registered with the
/// dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON schema for the tool's input parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Helpers for building JSON schemas for tool parameters
pub mod schema {
    use serde_json::{Value, json};

    /// Object schema with properties and required fields
    pub fn object(properties: Value, required: Vec<&str>) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// String property schema
    pub fn string(description: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
        })
    }

    /// String property schema restricted to an enumerated set
    pub fn string_enum(description: &str, allowed: &[&str]) -> Value {
        json!({
            "type": "string",
            "enum": allowed,
            "description": description,
        })
    }

    /// Integer property schema
    pub fn integer(description: &str) -> Value {
        json!({
            "type": "integer",
            "description": description,
        })
    }
}
