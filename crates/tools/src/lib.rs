//! MCP Tools for the Rental Assistant
//!
//! Implements an MCP (Model Context Protocol) compatible tool interface
//! with the lease calculators: rent and deposit calculation, move-out
//! deadline calculation, and repair responsibility classification.
//!
//! The tools are stateless wrappers around pure calculation functions;
//! the chat/agent layer invokes them by name with JSON arguments
//! extracted from user utterances and displays the returned narrative.

pub mod lease;
pub mod mcp;
pub mod registry;

pub use lease::{
    // Pure calculation functions
    calculate_move_out, calculate_rent, classify_repair,
    // Narrative rendering
    move_out_summary, rent_summary, repair_summary,
    // Tool implementations
    MoveOutCalculatorTool, RentCalculatorTool, RepairResponsibilityTool,
};
pub use mcp::{
    ContentBlock, InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema,
};
pub use registry::{
    create_registry, create_registry_from_settings, ConfigurableToolRegistry, ToolCall,
    ToolCallTracker, ToolExecutor, ToolRegistry,
};
