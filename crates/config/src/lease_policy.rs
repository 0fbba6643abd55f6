//! Lease Policy Configuration
//!
//! Contains the configurable business parameters used by the lease
//! calculators: currency presentation, default notice periods, the
//! small-repair clause cap, and the keyword lists driving repair
//! responsibility classification.

use serde::{Deserialize, Serialize};

/// Lease policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeasePolicyConfig {
    /// Currency symbol prefixed to amounts shown to users
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Default notice period for early termination, in months
    #[serde(default = "default_notice_period_months")]
    pub default_notice_period_months: u32,

    /// Default notice period for move-out, in calendar days
    #[serde(default = "default_notice_days")]
    pub default_notice_days: u32,

    /// Small-repair clause: tenant bears cost up to this cap,
    /// landlord bears the excess
    #[serde(default = "default_small_repair_cap")]
    pub small_repair_cap: f64,

    /// Keyword lists for repair responsibility classification
    #[serde(default)]
    pub repair_keywords: RepairKeywords,
}

/// Repair classification keywords
///
/// Matching is case-insensitive substring matching on the raw repair
/// description. The evaluation order of the categories is fixed by the
/// classifier, not by this config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairKeywords {
    /// Consumables the tenant replaces themselves
    #[serde(default = "default_consumable_keywords")]
    pub consumable: Vec<String>,

    /// Appliances the landlord services
    #[serde(default = "default_landlord_appliance_keywords")]
    pub landlord_appliance: Vec<String>,

    /// Building structure and shared facilities
    #[serde(default = "default_structural_keywords")]
    pub structural: Vec<String>,
}

// Default values

fn default_currency_symbol() -> String {
    "S$".to_string()
}

fn default_notice_period_months() -> u32 {
    2
}

fn default_notice_days() -> u32 {
    60
}

fn default_small_repair_cap() -> f64 {
    200.0
}

fn default_consumable_keywords() -> Vec<String> {
    vec!["bulb".into(), "tube".into()]
}

fn default_landlord_appliance_keywords() -> Vec<String> {
    vec!["air conditioner".into()]
}

fn default_structural_keywords() -> Vec<String> {
    vec![
        "light".into(),
        "roof".into(),
        "pipe".into(),
        "circuit".into(),
        "structure".into(),
    ]
}

impl Default for LeasePolicyConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            default_notice_period_months: default_notice_period_months(),
            default_notice_days: default_notice_days(),
            small_repair_cap: default_small_repair_cap(),
            repair_keywords: RepairKeywords::default(),
        }
    }
}

impl Default for RepairKeywords {
    fn default() -> Self {
        Self {
            consumable: default_consumable_keywords(),
            landlord_appliance: default_landlord_appliance_keywords(),
            structural: default_structural_keywords(),
        }
    }
}

fn contains_any(text_lower: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| text_lower.contains(k.as_str()))
}

impl LeasePolicyConfig {
    /// Whether the repair description names a tenant consumable.
    /// Expects the description already lowercased.
    pub fn is_consumable(&self, repair_type_lower: &str) -> bool {
        contains_any(repair_type_lower, &self.repair_keywords.consumable)
    }

    /// Whether the repair description names a landlord-serviced appliance.
    pub fn is_landlord_appliance(&self, repair_type_lower: &str) -> bool {
        contains_any(repair_type_lower, &self.repair_keywords.landlord_appliance)
    }

    /// Whether the repair description names building structure.
    pub fn is_structural(&self, repair_type_lower: &str) -> bool {
        contains_any(repair_type_lower, &self.repair_keywords.structural)
    }

    /// Split a repair cost under the small-repair clause.
    /// Returns (tenant_share, landlord_share); shares always sum to cost.
    pub fn split_repair_cost(&self, cost: f64) -> (f64, f64) {
        if cost <= self.small_repair_cap {
            (cost, 0.0)
        } else {
            (self.small_repair_cap, cost - self.small_repair_cap)
        }
    }
}
