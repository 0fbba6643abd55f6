//! Repair Responsibility Tool
//!
//! Classifies a repair into landlord/tenant responsibility shares
//! using the policy keyword lists and the small-repair clause.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use rental_assistant_config::LeasePolicyConfig;

use super::args;
use super::calculations::{classify_repair, repair_summary};
use crate::mcp::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};

const TOOL_NAME: &str = "get_repair_responsibility";

/// Repair responsibility classifier tool
pub struct RepairResponsibilityTool {
    policy: Arc<LeasePolicyConfig>,
}

impl RepairResponsibilityTool {
    pub fn new(policy: Arc<LeasePolicyConfig>) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl Tool for RepairResponsibilityTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Judge repair responsibility based on the repair type and quoted cost"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: TOOL_NAME.to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property(
                    "repair_type",
                    PropertySchema::string(
                        "Description of the item needing repair, e.g. \"air conditioner\"",
                    ),
                    true,
                )
                .property(
                    "cost",
                    PropertySchema::number("Quoted repair cost; 0 when unknown")
                        .with_minimum(0.0)
                        .with_default(json!(0.0)),
                    false,
                ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let repair_type = args::required_str(&input, "repair_type")?;
        let cost = args::optional_f64(&input, "cost", 0.0)?;

        let assessment = classify_repair(repair_type, cost, &self.policy)?;

        tracing::trace!(
            category = %assessment.category,
            tenant_share = assessment.tenant_share,
            landlord_share = assessment.landlord_share,
            "Repair responsibility classified"
        );

        let message = repair_summary(&assessment, &self.policy.currency_symbol, &self.policy);
        let mut result = serde_json::to_value(&assessment)
            .map_err(|e| ToolError::execution_failed(e.to_string()))?;
        result["message"] = json!(message);

        Ok(ToolOutput::json(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> RepairResponsibilityTool {
        RepairResponsibilityTool::new(Arc::new(LeasePolicyConfig::default()))
    }

    #[tokio::test]
    async fn test_execute_consumable() {
        let output = tool()
            .execute(json!({"repair_type": "light bulb replacement"}))
            .await
            .unwrap();
        let result = output.structured().unwrap();
        assert_eq!(result["category"], "tenant-consumable");
        assert!(output.narrative().contains("Tenant bears"));
    }

    #[tokio::test]
    async fn test_execute_air_conditioner_with_cost() {
        let output = tool()
            .execute(json!({"repair_type": "air conditioner", "cost": 50.0}))
            .await
            .unwrap();
        let result = output.structured().unwrap();
        assert_eq!(result["category"], "landlord-maintained");
        assert_eq!(result["landlord_share"], 50.0);
    }

    #[tokio::test]
    async fn test_execute_cost_split() {
        let output = tool()
            .execute(json!({"repair_type": "plumbing leak", "cost": 300.0}))
            .await
            .unwrap();
        let result = output.structured().unwrap();
        assert_eq!(result["category"], "cost-split");
        assert_eq!(result["tenant_share"], 200.0);
        assert_eq!(result["landlord_share"], 100.0);
    }

    #[tokio::test]
    async fn test_execute_undetermined_defaults_cost() {
        let output = tool()
            .execute(json!({"repair_type": "mystery issue"}))
            .await
            .unwrap();
        let result = output.structured().unwrap();
        assert_eq!(result["category"], "undetermined");
        assert_eq!(result["tenant_share"], 0.0);
        assert_eq!(result["landlord_share"], 0.0);
    }

    #[tokio::test]
    async fn test_execute_missing_repair_type() {
        let err = tool().execute(json!({"cost": 100.0})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }
}
