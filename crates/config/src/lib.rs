//! Configuration management for the rental assistant
//!
//! Supports loading configuration from:
//! - YAML/TOML files
//! - Environment variables (RENTAL_ASSISTANT_ prefix)
//! - Built-in defaults
//!
//! Business parameters (currency symbol, small-repair cap, notice
//! periods, repair keyword lists) live in [`LeasePolicyConfig`] and are
//! passed explicitly to the calculators at startup rather than read
//! from ambient global state.

pub mod lease_policy;
pub mod settings;

pub use lease_policy::{LeasePolicyConfig, RepairKeywords};
pub use settings::{load_settings, Settings, ToolSettings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
