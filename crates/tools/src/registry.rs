//! Tool Registry
//!
//! Manages tool registration, discovery, and execution.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use rental_assistant_config::{LeasePolicyConfig, Settings};

use crate::mcp::{Tool, ToolError, ToolOutput, ToolSchema};

/// Default timeout for tool execution (30 seconds)
const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

/// Default bound on retained tool call history
const DEFAULT_CALL_HISTORY: usize = 100;

/// Tool executor trait
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool by name
    async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError>;

    /// List available tools
    fn list_tools(&self) -> Vec<ToolSchema>;

    /// Get tool schema by name
    fn get_tool(&self, name: &str) -> Option<ToolSchema>;
}

/// Tool registry
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    default_timeout_secs: u64,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            default_timeout_secs: DEFAULT_TOOL_TIMEOUT_SECS,
        }
    }

    /// Create an empty registry with a custom default timeout
    pub fn with_default_timeout(timeout_secs: u64) -> Self {
        Self {
            tools: HashMap::new(),
            default_timeout_secs: timeout_secs,
        }
    }

    /// Register a tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Register a boxed tool
    pub fn register_boxed(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Check if tool exists
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    fn timeout_for(&self, tool: &Arc<dyn Tool>) -> u64 {
        tool.timeout_secs().unwrap_or(self.default_timeout_secs)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    /// Execute a tool with timeout protection
    async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::not_found(format!("Tool not found: {}", name)))?;

        tool.validate(&arguments)?;

        let timeout_secs = self.timeout_for(tool);
        let timeout_duration = Duration::from_secs(timeout_secs);

        tracing::trace!(
            tool = name,
            timeout_secs = timeout_secs,
            "Executing tool with timeout"
        );

        match tokio::time::timeout(timeout_duration, tool.execute(arguments)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(ToolError::timeout(name, timeout_secs)),
        }
    }

    fn list_tools(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    fn get_tool(&self, name: &str) -> Option<ToolSchema> {
        self.tools.get(name).map(|t| t.schema())
    }
}

/// Tool call result for conversation tracking
#[derive(Debug, Clone)]
pub struct ToolCall {
    /// Tool name
    pub name: String,
    /// Input arguments
    pub arguments: Value,
    /// Output result
    pub output: ToolOutput,
    /// Execution duration (ms)
    pub duration_ms: u64,
    /// Timestamp
    pub timestamp: std::time::Instant,
}

/// Bounded history of tool calls within a conversation
pub struct ToolCallTracker {
    calls: VecDeque<ToolCall>,
    max_history: usize,
}

impl ToolCallTracker {
    pub fn new(max_history: usize) -> Self {
        Self {
            calls: VecDeque::with_capacity(max_history),
            max_history,
        }
    }

    /// Record a tool call, evicting the oldest when full
    pub fn record(&mut self, call: ToolCall) {
        if self.calls.len() >= self.max_history {
            self.calls.pop_front();
        }
        self.calls.push_back(call);
    }

    /// Get the most recent calls as a slice
    pub fn recent(&mut self, n: usize) -> &[ToolCall] {
        self.calls.make_contiguous();
        let (slice, _) = self.calls.as_slices();
        let start = slice.len().saturating_sub(n);
        &slice[start..]
    }

    /// Get all calls as a slice
    pub fn all(&mut self) -> &[ToolCall] {
        self.calls.make_contiguous();
        let (slice, _) = self.calls.as_slices();
        slice
    }

    /// Get calls by tool name
    pub fn by_name(&self, name: &str) -> Vec<&ToolCall> {
        self.calls.iter().filter(|c| c.name == name).collect()
    }

    /// Clear history
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

/// Create a registry with the three lease tools
///
/// The policy object carries every business constant the calculators
/// use; tools cannot be created without it.
pub fn create_registry(policy: Arc<LeasePolicyConfig>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(crate::lease::RentCalculatorTool::new(policy.clone()));
    registry.register(crate::lease::MoveOutCalculatorTool::new(policy.clone()));
    registry.register(crate::lease::RepairResponsibilityTool::new(policy.clone()));

    tracing::info!(
        tool_count = registry.len(),
        currency = %policy.currency_symbol,
        notice_days = policy.default_notice_days,
        small_repair_cap = policy.small_repair_cap,
        "Created lease tool registry"
    );

    registry
}

/// Create a registry from full application settings
///
/// Applies the tool execution timeout from settings in addition to the
/// lease policy.
pub fn create_registry_from_settings(settings: &Settings) -> ToolRegistry {
    let policy = Arc::new(settings.policy.clone());
    let mut registry = ToolRegistry::with_default_timeout(settings.tools.execution_timeout_secs);

    registry.register(crate::lease::RentCalculatorTool::new(policy.clone()));
    registry.register(crate::lease::MoveOutCalculatorTool::new(policy.clone()));
    registry.register(crate::lease::RepairResponsibilityTool::new(policy.clone()));

    tracing::info!(
        tool_count = registry.len(),
        timeout_secs = settings.tools.execution_timeout_secs,
        "Created lease tool registry from settings"
    );

    registry
}

/// Configurable tool registry with hot-reload support
///
/// Wraps a ToolRegistry with lease policy management, allowing tools
/// to be recreated when configuration changes without restarting the
/// calling layer. Successful calls are recorded in a bounded
/// [`ToolCallTracker`] for conversation tracking.
pub struct ConfigurableToolRegistry {
    inner: parking_lot::RwLock<ToolRegistry>,
    policy: parking_lot::RwLock<Arc<LeasePolicyConfig>>,
    tracker: parking_lot::Mutex<ToolCallTracker>,
}

impl ConfigurableToolRegistry {
    /// Create with a lease policy
    pub fn new(policy: Arc<LeasePolicyConfig>) -> Self {
        let registry = create_registry(policy.clone());
        Self {
            inner: parking_lot::RwLock::new(registry),
            policy: parking_lot::RwLock::new(policy),
            tracker: parking_lot::Mutex::new(ToolCallTracker::new(DEFAULT_CALL_HISTORY)),
        }
    }

    /// Create with the default policy
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(LeasePolicyConfig::default()))
    }

    /// Create from full application settings (timeout and history bound)
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            inner: parking_lot::RwLock::new(create_registry_from_settings(settings)),
            policy: parking_lot::RwLock::new(Arc::new(settings.policy.clone())),
            tracker: parking_lot::Mutex::new(ToolCallTracker::new(settings.tools.call_history)),
        }
    }

    /// Reload configuration and recreate tools
    ///
    /// This is the hot-reload entry point. Call this when config changes.
    pub fn reload(&self, new_policy: Arc<LeasePolicyConfig>) {
        {
            let old_policy = self.policy.read();
            tracing::info!(
                old_cap = old_policy.small_repair_cap,
                new_cap = new_policy.small_repair_cap,
                "Hot-reloading lease tool configuration"
            );
        }

        *self.policy.write() = new_policy.clone();
        *self.inner.write() = create_registry(new_policy);
    }

    /// Get current policy
    pub fn policy(&self) -> Arc<LeasePolicyConfig> {
        self.policy.read().clone()
    }

    /// Execute a tool
    pub async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError> {
        // Get the tool without holding the lock across await
        let (tool, timeout_secs) = {
            let registry = self.inner.read();
            let tool = registry.get(name).cloned();
            let timeout = tool.as_ref().map(|t| registry.timeout_for(t));
            (tool, timeout)
        };

        let tool = tool.ok_or_else(|| ToolError::not_found(format!("Tool not found: {}", name)))?;
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TOOL_TIMEOUT_SECS);

        tool.validate(&arguments)?;

        let started = std::time::Instant::now();
        let result = match tokio::time::timeout(
            Duration::from_secs(timeout_secs),
            tool.execute(arguments.clone()),
        )
        .await
        {
            Ok(result) => result,
            Err(_elapsed) => Err(ToolError::timeout(name, timeout_secs)),
        };

        if let Ok(ref output) = result {
            self.tracker.lock().record(ToolCall {
                name: name.to_string(),
                arguments,
                output: output.clone(),
                duration_ms: started.elapsed().as_millis() as u64,
                timestamp: started,
            });
        }

        result
    }

    /// Get the most recent recorded calls, newest last
    pub fn recent_calls(&self, n: usize) -> Vec<ToolCall> {
        self.tracker.lock().recent(n).to_vec()
    }

    /// Get recorded calls for one tool
    pub fn calls_by_name(&self, name: &str) -> Vec<ToolCall> {
        self.tracker
            .lock()
            .by_name(name)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Clear the recorded call history
    pub fn clear_call_history(&self) {
        self.tracker.lock().clear();
    }

    /// List available tools
    pub fn list_tools(&self) -> Vec<ToolSchema> {
        self.inner.read().list_tools()
    }

    /// Get tool schema
    pub fn get_tool(&self, name: &str) -> Option<ToolSchema> {
        self.inner.read().get_tool(name)
    }

    /// Check if tool exists
    pub fn has(&self, name: &str) -> bool {
        self.inner.read().has(name)
    }

    /// Get tool count
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

#[async_trait]
impl ToolExecutor for ConfigurableToolRegistry {
    async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError> {
        self.execute(name, arguments).await
    }

    fn list_tools(&self) -> Vec<ToolSchema> {
        self.list_tools()
    }

    fn get_tool(&self, name: &str) -> Option<ToolSchema> {
        self.get_tool(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_policy() -> Arc<LeasePolicyConfig> {
        Arc::new(LeasePolicyConfig::default())
    }

    #[test]
    fn test_registry_basic() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(crate::lease::RentCalculatorTool::new(test_policy()));
        assert_eq!(registry.len(), 1);
        assert!(registry.has("calculate_rent"));
    }

    #[test]
    fn test_registry_has_all_lease_tools() {
        let registry = create_registry(test_policy());

        assert_eq!(registry.len(), 3);
        assert!(registry.has("calculate_rent"));
        assert!(registry.has("calculate_moveout_date"));
        assert!(registry.has("get_repair_responsibility"));
    }

    #[test]
    fn test_registry_list_tools() {
        let registry = create_registry(test_policy());
        let tools = registry.list_tools();

        assert_eq!(tools.len(), 3);
        assert!(tools.iter().any(|t| t.name == "calculate_rent"));
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let registry = create_registry(test_policy());
        let err = registry.execute("no_such_tool", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_execute_validates_required_arguments() {
        let registry = create_registry(test_policy());
        let err = registry
            .execute("calculate_rent", json!({"deposit": 500.0}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }

    #[test]
    fn test_tool_call_tracker() {
        let mut tracker = ToolCallTracker::new(2);

        for i in 0..3 {
            tracker.record(ToolCall {
                name: format!("tool{}", i),
                arguments: json!({}),
                output: ToolOutput::text("result"),
                duration_ms: 10,
                timestamp: std::time::Instant::now(),
            });
        }

        // Oldest call evicted at capacity
        assert_eq!(tracker.all().len(), 2);
        assert_eq!(tracker.recent(1)[0].name, "tool2");
        assert!(tracker.by_name("tool0").is_empty());
    }

    #[tokio::test]
    async fn test_configurable_registry_reload() {
        let registry = ConfigurableToolRegistry::with_defaults();
        assert_eq!(registry.len(), 3);

        let mut new_policy = LeasePolicyConfig::default();
        new_policy.small_repair_cap = 150.0;
        registry.reload(Arc::new(new_policy));

        assert_eq!(registry.policy().small_repair_cap, 150.0);

        // Tools now use the new cap: 300 splits as 150/150
        let output = registry
            .execute(
                "get_repair_responsibility",
                json!({"repair_type": "window hinge", "cost": 300.0}),
            )
            .await
            .unwrap();
        let result = output.structured().unwrap();
        assert_eq!(result["tenant_share"], 150.0);
        assert_eq!(result["landlord_share"], 150.0);
    }

    #[tokio::test]
    async fn test_configurable_registry_records_calls() {
        let mut settings = Settings::default();
        settings.tools.call_history = 2;
        let registry = ConfigurableToolRegistry::from_settings(&settings);

        for _ in 0..2 {
            registry
                .execute(
                    "calculate_rent",
                    json!({"monthly_rent": 1000.0, "stay_months": 6}),
                )
                .await
                .unwrap();
        }
        registry
            .execute(
                "calculate_moveout_date",
                json!({"current_date": "2025-03-01"}),
            )
            .await
            .unwrap();

        // History is bounded: the oldest rent call was evicted
        let recent = registry.recent_calls(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent.last().unwrap().name, "calculate_moveout_date");
        assert_eq!(registry.calls_by_name("calculate_rent").len(), 1);

        // Failed calls are not recorded
        let _ = registry.execute("calculate_rent", json!({})).await;
        assert_eq!(registry.recent_calls(10).len(), 2);

        registry.clear_call_history();
        assert!(registry.recent_calls(10).is_empty());
    }

    #[test]
    fn test_registry_from_settings_applies_timeout() {
        let mut settings = Settings::default();
        settings.tools.execution_timeout_secs = 5;
        let registry = create_registry_from_settings(&settings);
        assert_eq!(registry.default_timeout_secs, 5);
        assert_eq!(registry.len(), 3);
    }
}
