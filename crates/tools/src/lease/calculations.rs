//! Lease calculation functions
//!
//! Pure, stateless calculators shared by the tool wrappers:
//! - rent and refundable deposit, with early-termination penalty
//! - move-out deadline from a notice date and notice period
//! - repair responsibility classification
//!
//! Negative monetary inputs are rejected with a validation error
//! rather than silently producing nonsensical results.

use chrono::{Duration, NaiveDate};

use rental_assistant_config::LeasePolicyConfig;
use rental_assistant_core::{
    format_currency, Error, MoveOutSchedule, RentCalculation, RepairAssessment, RepairCategory,
    Result,
};

/// Strict parse format for notice dates.
const NOTICE_DATE_FORMAT: &str = "%Y-%m-%d";

fn require_non_negative(field: &'static str, value: f64) -> Result<()> {
    if value < 0.0 || value.is_nan() {
        return Err(Error::validation(
            field,
            format!("must be non-negative, got {}", value),
        ));
    }
    Ok(())
}

/// Calculate total rent and refundable deposit.
///
/// When terminating early the penalty is one month of rent per notice
/// period month; the refundable deposit never goes below zero.
pub fn calculate_rent(
    monthly_rent: f64,
    stay_months: u32,
    deposit: f64,
    early_termination: bool,
    notice_period_months: u32,
) -> Result<RentCalculation> {
    require_non_negative("monthly_rent", monthly_rent)?;
    require_non_negative("deposit", deposit)?;

    let total_rent = monthly_rent * stay_months as f64;
    let (penalty, refundable_deposit) = if early_termination {
        let penalty = monthly_rent * notice_period_months as f64;
        (penalty, (deposit - penalty).max(0.0))
    } else {
        (0.0, deposit)
    };

    Ok(RentCalculation {
        monthly_rent,
        stay_months,
        total_rent,
        early_termination,
        notice_period_months,
        penalty,
        deposit_paid: deposit,
        refundable_deposit,
    })
}

/// Calculate the move-out deadline from a notice date.
///
/// The date must be in strict `YYYY-MM-DD` form; anything else is a
/// recoverable [`Error::DateParse`] the caller surfaces to the user.
/// `days_remaining` is the difference between the computed deadline
/// and the notice date, which equals `notice_days` by construction.
pub fn calculate_move_out(notice_date: &str, notice_days: u32) -> Result<MoveOutSchedule> {
    let notice = NaiveDate::parse_from_str(notice_date, NOTICE_DATE_FORMAT)
        .map_err(|_| Error::date_parse(notice_date))?;

    let move_out_date = notice
        .checked_add_signed(Duration::days(notice_days as i64))
        .ok_or_else(|| Error::date_out_of_range(notice_date, notice_days))?;
    let days_remaining = (move_out_date - notice).num_days();

    Ok(MoveOutSchedule {
        notice_date: notice,
        notice_days,
        move_out_date,
        days_remaining,
    })
}

/// Classify repair responsibility.
///
/// Rules are evaluated in strict priority order; the first match wins:
/// 1. consumable keywords (bulb, tube) -> tenant
/// 2. landlord-serviced appliance keywords (air conditioner) -> landlord
/// 3. cost > 0 -> small-repair cost split
/// 4. structural keywords (light, roof, pipe, circuit, structure) -> landlord
/// 5. otherwise undetermined
///
/// The order is contractual: "air conditioner repair costing S$50"
/// stays with the landlord even though its cost would match rule 3,
/// and "light bulb" is a consumable even though "light" is a
/// structural keyword.
pub fn classify_repair(
    repair_type: &str,
    cost: f64,
    policy: &LeasePolicyConfig,
) -> Result<RepairAssessment> {
    require_non_negative("cost", cost)?;

    let lowered = repair_type.to_lowercase();

    let (category, tenant_share, landlord_share) = if policy.is_consumable(&lowered) {
        (RepairCategory::TenantConsumable, cost, 0.0)
    } else if policy.is_landlord_appliance(&lowered) {
        // No misuse flag is supplied, so the full cost sits with the
        // landlord by convention; the narrative spells out when the
        // tenant would bear it instead.
        (RepairCategory::LandlordMaintained, 0.0, cost)
    } else if cost > 0.0 {
        let (tenant, landlord) = policy.split_repair_cost(cost);
        (RepairCategory::CostSplit, tenant, landlord)
    } else if policy.is_structural(&lowered) {
        (RepairCategory::Structural, 0.0, cost)
    } else {
        (RepairCategory::Undetermined, 0.0, 0.0)
    };

    Ok(RepairAssessment {
        repair_type: repair_type.to_string(),
        cost,
        tenant_share,
        landlord_share,
        category,
    })
}

/// Render the rent calculation narrative shown to the end user.
pub fn rent_summary(calc: &RentCalculation, currency: &str) -> String {
    if calc.early_termination {
        format!(
            "🏠 Rent Calculation Result:\n\
             - Monthly Rent: {}\n\
             - Actual Stay Duration: {} months\n\
             - Total Rent Payable: {}\n\
             - Early Termination Penalty (Notice Period: {} months): {}\n\
             - Deposit Paid: {}\n\
             - Refundable Deposit: {}\n\
             ⚠️ Note: The penalty calculation is based on common rental contract terms and is subject to your specific contract.",
            format_currency(currency, calc.monthly_rent),
            calc.stay_months,
            format_currency(currency, calc.total_rent),
            calc.notice_period_months,
            format_currency(currency, calc.penalty),
            format_currency(currency, calc.deposit_paid),
            format_currency(currency, calc.refundable_deposit),
        )
    } else {
        format!(
            "🏠 Rent Calculation Result:\n\
             - Monthly Rent: {}\n\
             - Actual Stay Duration: {} months\n\
             - Total Rent Payable: {}\n\
             - Deposit Paid: {}\n\
             - Refundable Deposit (No Damage): {}",
            format_currency(currency, calc.monthly_rent),
            calc.stay_months,
            format_currency(currency, calc.total_rent),
            format_currency(currency, calc.deposit_paid),
            format_currency(currency, calc.refundable_deposit),
        )
    }
}

/// Render the move-out narrative. Dates use the bilingual
/// `YYYY年MM月DD日` presentation and day counts the `天` suffix.
pub fn move_out_summary(schedule: &MoveOutSchedule) -> String {
    format!(
        "📅 Move-Out Date Calculation Result:\n\
         - Notice Submission Date: {}\n\
         - Notice Period: {}天\n\
         - Move-Out Deadline: {}\n\
         - Days Remaining: {}天\n\
         ✅ Please complete the move-out inspection and key handover before the deadline.",
        schedule.notice_date.format("%Y年%m月%d日"),
        schedule.notice_days,
        schedule.move_out_date.format("%Y年%m月%d日"),
        schedule.days_remaining,
    )
}

/// Render the repair responsibility narrative for a category.
pub fn repair_summary(
    assessment: &RepairAssessment,
    currency: &str,
    policy: &LeasePolicyConfig,
) -> String {
    let name = assessment.repair_type.to_lowercase();
    match assessment.category {
        RepairCategory::TenantConsumable => format!(
            "💡 {} maintenance responsibility: Tenant bears (needs to be replaced by themselves, cost borne by themselves)",
            name
        ),
        RepairCategory::LandlordMaintained => format!(
            "❄️ {} maintenance responsibility:\n\
             - Regular maintenance (every 3 months): Landlord bears\n\
             - Normal wear and tear (non-human causes): Landlord bears\n\
             - Damage caused by improper use: Tenant bears\n\
             ⚠️ Subject to specific contract terms.",
            name
        ),
        RepairCategory::CostSplit => {
            if assessment.landlord_share == 0.0 {
                format!(
                    "💰 {} maintenance ({}): Tenant bears full responsibility (small repair clause)",
                    name,
                    format_currency(currency, assessment.cost),
                )
            } else {
                format!(
                    "💰 {} maintenance ({}):\n\
                     - Tenant bears: {}\n\
                     - Landlord bears: {}\n\
                     ⚠️ Usually, the portion exceeding {}{:.0} is borne by the landlord.",
                    name,
                    format_currency(currency, assessment.cost),
                    format_currency(currency, assessment.tenant_share),
                    format_currency(currency, assessment.landlord_share),
                    currency,
                    policy.small_repair_cap,
                )
            }
        }
        RepairCategory::Structural => format!(
            "🏗️ {} maintenance responsibility: Landlord bears (belongs to building structure or public facilities)",
            name
        ),
        RepairCategory::Undetermined => format!(
            "ℹ️ Unable to determine {} maintenance responsibility, please refer to the rental contract terms or provide more details.",
            name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> LeasePolicyConfig {
        LeasePolicyConfig::default()
    }

    #[test]
    fn test_rent_no_early_termination() {
        let calc = calculate_rent(1000.0, 6, 500.0, false, 2).unwrap();
        assert_eq!(calc.total_rent, 6000.0);
        assert_eq!(calc.penalty, 0.0);
        assert_eq!(calc.refundable_deposit, 500.0);
    }

    #[test]
    fn test_rent_early_termination_penalty_caps_deposit() {
        let calc = calculate_rent(1000.0, 6, 2000.0, true, 2).unwrap();
        assert_eq!(calc.total_rent, 6000.0);
        assert_eq!(calc.penalty, 2000.0);
        assert_eq!(calc.refundable_deposit, 0.0);
    }

    #[test]
    fn test_rent_refundable_deposit_never_negative() {
        let calc = calculate_rent(1000.0, 3, 500.0, true, 2).unwrap();
        assert_eq!(calc.penalty, 2000.0);
        assert_eq!(calc.refundable_deposit, 0.0);
    }

    #[test]
    fn test_rent_zero_inputs() {
        let calc = calculate_rent(0.0, 0, 0.0, false, 2).unwrap();
        assert_eq!(calc.total_rent, 0.0);
        assert_eq!(calc.refundable_deposit, 0.0);
    }

    #[test]
    fn test_rent_rejects_negative_inputs() {
        assert!(calculate_rent(-1.0, 6, 0.0, false, 2).is_err());
        assert!(calculate_rent(1000.0, 6, -1.0, false, 2).is_err());
    }

    #[test]
    fn test_rent_summary_branches() {
        let calc = calculate_rent(1000.0, 6, 500.0, false, 2).unwrap();
        let text = rent_summary(&calc, "S$");
        assert!(text.contains("Refundable Deposit (No Damage): S$500.00"));
        assert!(!text.contains("Penalty"));

        let calc = calculate_rent(1000.0, 6, 2000.0, true, 2).unwrap();
        let text = rent_summary(&calc, "S$");
        assert!(text.contains("Early Termination Penalty (Notice Period: 2 months): S$2000.00"));
        assert!(text.contains("Refundable Deposit: S$0.00"));
    }

    #[test]
    fn test_move_out_basic() {
        let schedule = calculate_move_out("2025-03-01", 60).unwrap();
        assert_eq!(
            schedule.move_out_date,
            NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()
        );
        assert_eq!(schedule.days_remaining, 60);
    }

    #[test]
    fn test_move_out_days_remaining_echoes_notice_days() {
        // days_remaining is the span between the two computed dates,
        // so it always equals the notice period.
        for days in [0, 1, 30, 90, 365] {
            let schedule = calculate_move_out("2025-01-15", days).unwrap();
            assert_eq!(schedule.days_remaining, days as i64);
        }
    }

    #[test]
    fn test_move_out_crosses_year_boundary() {
        let schedule = calculate_move_out("2024-12-15", 60).unwrap();
        assert_eq!(
            schedule.move_out_date,
            NaiveDate::from_ymd_opt(2025, 2, 13).unwrap()
        );
    }

    #[test]
    fn test_move_out_rejects_malformed_dates() {
        for input in ["not-a-date", "2025/03/01", "01-03-2025", "", "2025-13-01"] {
            let err = calculate_move_out(input, 60).unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains("YYYY-MM-DD"), "message missing format: {}", msg);
            assert!(msg.contains(input) || input.is_empty());
        }
    }

    #[test]
    fn test_move_out_notice_overflow_is_recoverable() {
        // Offsets past the calendar range report an error instead of
        // overflowing date arithmetic.
        let err = calculate_move_out("2025-03-01", u32::MAX).unwrap_err();
        assert!(err.is_user_facing());
        let msg = err.to_string();
        assert!(msg.contains("2025-03-01"));
        assert!(msg.contains("out of range"));
    }

    #[test]
    fn test_move_out_summary_bilingual() {
        let schedule = calculate_move_out("2025-03-01", 60).unwrap();
        let text = move_out_summary(&schedule);
        assert!(text.contains("2025年03月01日"));
        assert!(text.contains("2025年04月30日"));
        assert!(text.contains("60天"));
    }

    #[test]
    fn test_repair_consumable_beats_structural_keyword() {
        // "light bulb" contains both "bulb" (rule 1) and "light" (rule 4)
        let a = classify_repair("light bulb replacement", 0.0, &policy()).unwrap();
        assert_eq!(a.category, RepairCategory::TenantConsumable);
        assert_eq!(a.landlord_share, 0.0);
    }

    #[test]
    fn test_repair_air_conditioner_beats_cost_split() {
        let a = classify_repair("air conditioner", 50.0, &policy()).unwrap();
        assert_eq!(a.category, RepairCategory::LandlordMaintained);
        assert_eq!(a.tenant_share, 0.0);
        assert_eq!(a.landlord_share, 50.0);
    }

    #[test]
    fn test_repair_cost_split_beats_structural() {
        // "pipe" would be structural, but cost > 0 is checked first
        let a = classify_repair("plumbing leak", 300.0, &policy()).unwrap();
        assert_eq!(a.category, RepairCategory::CostSplit);
        assert_eq!(a.tenant_share, 200.0);
        assert_eq!(a.landlord_share, 100.0);
        assert_eq!(a.tenant_share + a.landlord_share, a.cost);
    }

    #[test]
    fn test_repair_small_cost_tenant_bears_all() {
        let a = classify_repair("door handle", 150.0, &policy()).unwrap();
        assert_eq!(a.category, RepairCategory::CostSplit);
        assert_eq!(a.tenant_share, 150.0);
        assert_eq!(a.landlord_share, 0.0);
    }

    #[test]
    fn test_repair_structural_without_cost() {
        let a = classify_repair("roof leak", 0.0, &policy()).unwrap();
        assert_eq!(a.category, RepairCategory::Structural);
        assert_eq!(a.tenant_share, 0.0);
    }

    #[test]
    fn test_repair_undetermined() {
        let a = classify_repair("mystery issue", 0.0, &policy()).unwrap();
        assert_eq!(a.category, RepairCategory::Undetermined);
        assert_eq!(a.tenant_share, 0.0);
        assert_eq!(a.landlord_share, 0.0);
    }

    #[test]
    fn test_repair_matching_case_insensitive() {
        let a = classify_repair("Air Conditioner Servicing", 0.0, &policy()).unwrap();
        assert_eq!(a.category, RepairCategory::LandlordMaintained);
    }

    #[test]
    fn test_repair_rejects_negative_cost() {
        assert!(classify_repair("roof leak", -10.0, &policy()).is_err());
    }

    #[test]
    fn test_repair_summary_cost_split() {
        let p = policy();
        let a = classify_repair("plumbing leak", 300.0, &p).unwrap();
        let text = repair_summary(&a, "S$", &p);
        assert!(text.contains("Tenant bears: S$200.00"));
        assert!(text.contains("Landlord bears: S$100.00"));
        assert!(text.contains("exceeding S$200"));

        let a = classify_repair("door handle", 80.0, &p).unwrap();
        let text = repair_summary(&a, "S$", &p);
        assert!(text.contains("small repair clause"));
    }
}
