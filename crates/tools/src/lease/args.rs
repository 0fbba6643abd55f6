//! JSON argument extraction
//!
//! Shared helpers for pulling named arguments out of tool input.
//! An absent (or null) optional argument takes the supplied default;
//! an argument that is present but of the wrong type, negative, or
//! out of range is rejected instead of silently replaced.

use serde_json::Value;

use crate::mcp::ToolError;

fn get<'a>(input: &'a Value, name: &str) -> Option<&'a Value> {
    match input.get(name) {
        Some(Value::Null) | None => None,
        Some(v) => Some(v),
    }
}

fn parse_u32(value: &Value, name: &str) -> Result<u32, ToolError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            ToolError::invalid_params(format!(
                "{} must be a non-negative integer, got {}",
                name, value
            ))
        })
}

pub(super) fn required_u32(input: &Value, name: &str) -> Result<u32, ToolError> {
    match get(input, name) {
        Some(v) => parse_u32(v, name),
        None => Err(ToolError::invalid_params(format!("{} is required", name))),
    }
}

pub(super) fn optional_u32(input: &Value, name: &str, default: u32) -> Result<u32, ToolError> {
    match get(input, name) {
        Some(v) => parse_u32(v, name),
        None => Ok(default),
    }
}

fn parse_f64(value: &Value, name: &str) -> Result<f64, ToolError> {
    value.as_f64().ok_or_else(|| {
        ToolError::invalid_params(format!("{} must be a number, got {}", name, value))
    })
}

pub(super) fn required_f64(input: &Value, name: &str) -> Result<f64, ToolError> {
    match get(input, name) {
        Some(v) => parse_f64(v, name),
        None => Err(ToolError::invalid_params(format!("{} is required", name))),
    }
}

pub(super) fn optional_f64(input: &Value, name: &str, default: f64) -> Result<f64, ToolError> {
    match get(input, name) {
        Some(v) => parse_f64(v, name),
        None => Ok(default),
    }
}

pub(super) fn optional_bool(input: &Value, name: &str, default: bool) -> Result<bool, ToolError> {
    match get(input, name) {
        Some(v) => v.as_bool().ok_or_else(|| {
            ToolError::invalid_params(format!("{} must be a boolean, got {}", name, v))
        }),
        None => Ok(default),
    }
}

pub(super) fn required_str<'a>(input: &'a Value, name: &str) -> Result<&'a str, ToolError> {
    match get(input, name) {
        Some(v) => v.as_str().ok_or_else(|| {
            ToolError::invalid_params(format!("{} must be a string, got {}", name, v))
        }),
        None => Err(ToolError::invalid_params(format!("{} is required", name))),
    }
}
