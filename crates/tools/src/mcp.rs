//! MCP-compatible tool interface
//!
//! Core tool types: the [`Tool`] trait, self-describing schemas, and
//! the output/error shapes exchanged with the agent layer. Tool input
//! and output are plain JSON so the calling layer can forward them to
//! an LLM tool-use API unchanged.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use rental_assistant_core::Error as CoreError;

/// Tool execution error
#[derive(Debug, Clone, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Tool '{tool}' timed out after {seconds}s")]
    Timeout { tool: String, seconds: u64 },
}

impl ToolError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }

    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    pub fn timeout(tool: impl Into<String>, seconds: u64) -> Self {
        Self::Timeout {
            tool: tool.into(),
            seconds,
        }
    }
}

impl From<CoreError> for ToolError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { .. } => Self::InvalidParams(err.to_string()),
            CoreError::DateParse { .. } | CoreError::DateOutOfRange { .. } => {
                Self::ExecutionFailed(err.to_string())
            }
        }
    }
}

/// Property schema for a single tool argument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub prop_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl PropertySchema {
    fn new(prop_type: &str, description: impl Into<String>) -> Self {
        Self {
            prop_type: prop_type.to_string(),
            description: description.into(),
            minimum: None,
            default: None,
        }
    }

    pub fn number(description: impl Into<String>) -> Self {
        Self::new("number", description)
    }

    pub fn integer(description: impl Into<String>) -> Self {
        Self::new("integer", description)
    }

    pub fn string(description: impl Into<String>) -> Self {
        Self::new("string", description)
    }

    pub fn boolean(description: impl Into<String>) -> Self {
        Self::new("boolean", description)
    }

    /// Advertise a lower bound, e.g. non-negativity of amounts
    pub fn with_minimum(mut self, min: f64) -> Self {
        self.minimum = Some(min);
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// JSON-schema style input description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: BTreeMap<String, PropertySchema>,
    pub required: Vec<String>,
}

impl InputSchema {
    /// Start building an object schema
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    /// Add a property; `required` controls membership in the required list
    pub fn property(
        mut self,
        name: impl Into<String>,
        schema: PropertySchema,
        required: bool,
    ) -> Self {
        let name = name.into();
        if required {
            self.required.push(name.clone());
        }
        self.properties.insert(name, schema);
        self
    }
}

/// Full tool schema advertised to the agent layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

/// One block of tool output content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Human-readable narrative, displayed directly to the end user
    Text { text: String },
    /// Structured result record
    Json { json: Value },
}

/// Tool execution output
///
/// Carries both the structured result and the rendered narrative; the
/// agent layer picks whichever representation it needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Vec<ContentBlock>,
}

impl ToolOutput {
    /// Output with a single text block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Output with a structured record. When the record carries a
    /// `message` string it is also exposed as a text block so the
    /// agent layer can display it without digging into the JSON.
    pub fn json(value: Value) -> Self {
        let mut content = Vec::new();
        if let Some(msg) = value.get("message").and_then(|m| m.as_str()) {
            content.push(ContentBlock::Text {
                text: msg.to_string(),
            });
        }
        content.push(ContentBlock::Json { json: value });
        Self { content }
    }

    /// Concatenated text blocks
    pub fn narrative(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// First structured block, if any
    pub fn structured(&self) -> Option<&Value> {
        self.content.iter().find_map(|c| match c {
            ContentBlock::Json { json } => Some(json),
            _ => None,
        })
    }
}

/// Tool interface
///
/// Implementations are stateless and safe to invoke concurrently from
/// independent requests.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name used for dispatch
    fn name(&self) -> &str;

    /// One-line description for the agent layer
    fn description(&self) -> &str;

    /// Self-describing input schema
    fn schema(&self) -> ToolSchema;

    /// Per-tool timeout override in seconds; the registry default
    /// applies when `None`
    fn timeout_secs(&self) -> Option<u64> {
        None
    }

    /// Validate input before execution. The default checks the
    /// schema's required properties are present.
    fn validate(&self, input: &Value) -> Result<(), ToolError> {
        let schema = self.schema();
        let obj = input
            .as_object()
            .ok_or_else(|| ToolError::invalid_params("arguments must be a JSON object"))?;
        let missing: Vec<&str> = schema
            .input_schema
            .required
            .iter()
            .filter(|name| !obj.contains_key(name.as_str()))
            .map(|name| name.as_str())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ToolError::invalid_params(format!(
                "missing required arguments: {}",
                missing.join(", ")
            )))
        }
    }

    /// Execute with JSON arguments
    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError>;
}
