//! Core types for the rental assistant
//!
//! This crate provides foundational types used across all other crates:
//! - Error types (validation, date parsing)
//! - Lease calculation result records
//! - Currency formatting

pub mod error;
pub mod lease;
pub mod money;

pub use error::{Error, Result};
pub use lease::{MoveOutSchedule, RentCalculation, RepairAssessment, RepairCategory};
pub use money::format_currency;
