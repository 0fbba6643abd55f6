//! Rent Calculator Tool
//!
//! Computes total rent and refundable deposit, with an optional
//! early-termination penalty of one month of rent per notice month.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use rental_assistant_config::LeasePolicyConfig;

use super::args;
use super::calculations::{calculate_rent, rent_summary};
use crate::mcp::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};

const TOOL_NAME: &str = "calculate_rent";

/// Rent and deposit calculator tool
pub struct RentCalculatorTool {
    policy: Arc<LeasePolicyConfig>,
}

impl RentCalculatorTool {
    pub fn new(policy: Arc<LeasePolicyConfig>) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl Tool for RentCalculatorTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Calculate total rent and refundable deposit, including the early-termination penalty"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: TOOL_NAME.to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property(
                    "monthly_rent",
                    PropertySchema::number("Monthly rent amount").with_minimum(0.0),
                    true,
                )
                .property(
                    "stay_months",
                    PropertySchema::integer("Actual stay duration in months").with_minimum(0.0),
                    true,
                )
                .property(
                    "deposit",
                    PropertySchema::number("Deposit paid at lease start")
                        .with_minimum(0.0)
                        .with_default(json!(0.0)),
                    false,
                )
                .property(
                    "is_early_termination",
                    PropertySchema::boolean("Whether the tenant vacates before the lease end")
                        .with_default(json!(false)),
                    false,
                )
                .property(
                    "notice_period_months",
                    PropertySchema::integer("Contractual notice period in months")
                        .with_minimum(0.0)
                        .with_default(json!(self.policy.default_notice_period_months)),
                    false,
                ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let monthly_rent = args::required_f64(&input, "monthly_rent")?;
        let stay_months = args::required_u32(&input, "stay_months")?;
        let deposit = args::optional_f64(&input, "deposit", 0.0)?;
        let early_termination = args::optional_bool(&input, "is_early_termination", false)?;
        let notice_period_months = args::optional_u32(
            &input,
            "notice_period_months",
            self.policy.default_notice_period_months,
        )?;

        let calc = calculate_rent(
            monthly_rent,
            stay_months,
            deposit,
            early_termination,
            notice_period_months,
        )?;

        tracing::trace!(
            total_rent = calc.total_rent,
            penalty = calc.penalty,
            refundable = calc.refundable_deposit,
            "Rent calculation completed"
        );

        let message = rent_summary(&calc, &self.policy.currency_symbol);
        let mut result = serde_json::to_value(&calc)
            .map_err(|e| ToolError::execution_failed(e.to_string()))?;
        result["message"] = json!(message);

        Ok(ToolOutput::json(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> RentCalculatorTool {
        RentCalculatorTool::new(Arc::new(LeasePolicyConfig::default()))
    }

    #[tokio::test]
    async fn test_execute_basic() {
        let output = tool()
            .execute(json!({"monthly_rent": 1000.0, "stay_months": 6, "deposit": 500.0}))
            .await
            .unwrap();

        let result = output.structured().unwrap();
        assert_eq!(result["total_rent"], 6000.0);
        assert_eq!(result["penalty"], 0.0);
        assert_eq!(result["refundable_deposit"], 500.0);
        assert!(output.narrative().contains("S$6000.00"));
    }

    #[tokio::test]
    async fn test_execute_early_termination() {
        let output = tool()
            .execute(json!({
                "monthly_rent": 1000.0,
                "stay_months": 6,
                "deposit": 2000.0,
                "is_early_termination": true,
            }))
            .await
            .unwrap();

        let result = output.structured().unwrap();
        // Default notice period of 2 months applies
        assert_eq!(result["notice_period_months"], 2);
        assert_eq!(result["penalty"], 2000.0);
        assert_eq!(result["refundable_deposit"], 0.0);
    }

    #[tokio::test]
    async fn test_execute_missing_required() {
        let err = tool()
            .execute(json!({"stay_months": 6}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_execute_rejects_negative_notice_period() {
        // Present-but-invalid must not fall back to the policy default
        let err = tool()
            .execute(json!({
                "monthly_rent": 1000.0,
                "stay_months": 6,
                "is_early_termination": true,
                "notice_period_months": -2,
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_execute_rejects_wrong_typed_deposit() {
        let err = tool()
            .execute(json!({"monthly_rent": 1000.0, "stay_months": 6, "deposit": "500"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_execute_rejects_negative_rent() {
        let err = tool()
            .execute(json!({"monthly_rent": -500.0, "stay_months": 6}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }

    #[test]
    fn test_schema_required_fields() {
        let schema = tool().schema();
        assert_eq!(schema.input_schema.required, vec!["monthly_rent", "stay_months"]);
        assert_eq!(schema.input_schema.properties["monthly_rent"].minimum, Some(0.0));
        assert_eq!(schema.input_schema.properties["notice_period_months"].minimum, Some(0.0));
    }
}
