//! Lease calculation tools
//!
//! Three stateless tools backed by pure calculation functions. Each
//! tool pulls named JSON arguments, applies the policy defaults, and
//! returns the structured record plus a display narrative.

pub mod calculations;

mod args;
mod move_out;
mod rent;
mod repair;

pub use calculations::{
    calculate_move_out, calculate_rent, classify_repair, move_out_summary, rent_summary,
    repair_summary,
};
pub use move_out::MoveOutCalculatorTool;
pub use rent::RentCalculatorTool;
pub use repair::RepairResponsibilityTool;
