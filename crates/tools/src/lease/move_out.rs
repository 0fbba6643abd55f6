//! Move-Out Calculator Tool
//!
//! Computes the move-out deadline from a notice date and notice
//! period. A malformed date is not a tool failure: the user typed it,
//! so the tool answers with a corrective message instead of erroring.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use rental_assistant_config::LeasePolicyConfig;

use super::args;
use super::calculations::{calculate_move_out, move_out_summary};
use crate::mcp::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};

const TOOL_NAME: &str = "calculate_moveout_date";

/// Move-out deadline calculator tool
pub struct MoveOutCalculatorTool {
    policy: Arc<LeasePolicyConfig>,
}

impl MoveOutCalculatorTool {
    pub fn new(policy: Arc<LeasePolicyConfig>) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl Tool for MoveOutCalculatorTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Calculate the move-out deadline from the notice submission date and notice period"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: TOOL_NAME.to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property(
                    "current_date",
                    PropertySchema::string(
                        "Notice submission date in YYYY-MM-DD form, e.g. 2025-03-01",
                    ),
                    true,
                )
                .property(
                    "notice_days",
                    PropertySchema::integer("Notice period in calendar days")
                        .with_minimum(0.0)
                        .with_default(json!(self.policy.default_notice_days)),
                    false,
                ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let current_date = args::required_str(&input, "current_date")?;
        let notice_days =
            args::optional_u32(&input, "notice_days", self.policy.default_notice_days)?;

        match calculate_move_out(current_date, notice_days) {
            Ok(schedule) => {
                let message = move_out_summary(&schedule);
                let mut result = serde_json::to_value(&schedule)
                    .map_err(|e| ToolError::execution_failed(e.to_string()))?;
                result["message"] = json!(message);
                Ok(ToolOutput::json(result))
            }
            Err(err) if err.is_user_facing() => {
                // Recoverable user error (malformed or out-of-range
                // date): answer with a corrective message the agent
                // layer can display directly.
                tracing::debug!(input = current_date, code = err.code(), "Rejected notice date");
                let message = format!(
                    "❌ Date Calculation Error: {}. Please ensure the date format is YYYY-MM-DD (e.g., 2025-03-01).",
                    err
                );
                Ok(ToolOutput::json(json!({
                    "error": err.code(),
                    "input": current_date,
                    "message": message,
                })))
            }
            Err(err) => Err(err.into()),
        }
    }
}
