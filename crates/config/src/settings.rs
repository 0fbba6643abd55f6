//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, LeasePolicyConfig};

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Lease policy (business parameters for the calculators)
    #[serde(default)]
    pub policy: LeasePolicyConfig,

    /// Tool execution settings
    #[serde(default)]
    pub tools: ToolSettings,
}

/// Tool execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Per-call timeout for tool execution, in seconds
    #[serde(default = "default_execution_timeout_secs")]
    pub execution_timeout_secs: u64,

    /// Maximum number of tool calls retained for conversation tracking
    #[serde(default = "default_call_history")]
    pub call_history: usize,
}

fn default_execution_timeout_secs() -> u64 {
    30
}

fn default_call_history() -> usize {
    100
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            execution_timeout_secs: default_execution_timeout_secs(),
            call_history: default_call_history(),
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.policy.small_repair_cap < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "policy.small_repair_cap".to_string(),
                message: format!("Must be non-negative, got {}", self.policy.small_repair_cap),
            });
        }
        if self.policy.currency_symbol.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "policy.currency_symbol".to_string(),
                message: "Must not be empty".to_string(),
            });
        }
        if self.tools.execution_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tools.execution_timeout_secs".to_string(),
                message: "Must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (RENTAL_ASSISTANT_ prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("RENTAL_ASSISTANT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::info!(
        currency = %settings.policy.currency_symbol,
        notice_days = settings.policy.default_notice_days,
        small_repair_cap = settings.policy.small_repair_cap,
        "Loaded rental assistant settings"
    );

    Ok(settings)
}
