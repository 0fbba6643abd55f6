//! Lease calculation result records
//!
//! Each record fully describes one calculator invocation. No state is
//! retained between calls; the records are plain data handed back to
//! the chat/agent layer together with a rendered narrative.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Result of a rent and deposit calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentCalculation {
    /// Monthly rent amount
    pub monthly_rent: f64,
    /// Actual stay duration in months
    pub stay_months: u32,
    /// Total rent payable (monthly_rent * stay_months)
    pub total_rent: f64,
    /// Whether an early-termination penalty was applied
    pub early_termination: bool,
    /// Notice period used for the penalty, in months
    pub notice_period_months: u32,
    /// Penalty amount (0 when not terminating early)
    pub penalty: f64,
    /// Deposit paid at lease start
    pub deposit_paid: f64,
    /// Deposit refundable after deductions; never negative
    pub refundable_deposit: f64,
}

/// Result of a move-out deadline calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveOutSchedule {
    /// Date the termination notice was submitted
    pub notice_date: NaiveDate,
    /// Notice period in calendar days
    pub notice_days: u32,
    /// Deadline for vacating (notice_date + notice_days)
    pub move_out_date: NaiveDate,
    /// Days between notice_date and move_out_date. Equals notice_days
    /// by construction; kept as a separate field because the calling
    /// layer displays it as its own line item.
    pub days_remaining: i64,
}

/// Responsibility category for a repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepairCategory {
    /// Consumable item (bulb, tube); tenant replaces at own cost
    TenantConsumable,
    /// Appliance the landlord services (air conditioner)
    LandlordMaintained,
    /// Cost shared under the small-repair clause
    CostSplit,
    /// Building structure or shared facility; landlord bears
    Structural,
    /// No rule matched; needs human judgment, not a failure
    Undetermined,
}

impl RepairCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TenantConsumable => "tenant-consumable",
            Self::LandlordMaintained => "landlord-maintained",
            Self::CostSplit => "cost-split",
            Self::Structural => "structural",
            Self::Undetermined => "undetermined",
        }
    }
}

impl std::fmt::Display for RepairCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a repair responsibility classification.
///
/// Invariant: `tenant_share + landlord_share == cost` whenever a cost
/// split applies (categories other than `Undetermined` with cost > 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairAssessment {
    /// Repair description as supplied by the user
    pub repair_type: String,
    /// Quoted repair cost (0 when unknown)
    pub cost: f64,
    /// Portion borne by the tenant
    pub tenant_share: f64,
    /// Portion borne by the landlord
    pub landlord_share: f64,
    /// Responsibility category
    pub category: RepairCategory,
}
