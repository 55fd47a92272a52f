//! Spending alerts raised after an expense is recorded.

use rust_decimal::Decimal;

use super::budget_model::{AlertLevel, BudgetAlert, BudgetConfig, BudgetStatus};
use crate::constants::{ALERT_EXCEEDED_THRESHOLD, ALERT_NOTICE_THRESHOLD, ALERT_WARNING_THRESHOLD};
use crate::utils::format_currency;

/// Picks the alert for `status`, if any.
///
/// Nothing is raised when there is no budget or `alerts_enabled` is off.
pub fn evaluate_alert(config: &BudgetConfig, status: &BudgetStatus) -> Option<BudgetAlert> {
    if !config.alerts_enabled || !status.has_budget {
        return None;
    }

    let percentage = status.percentage;
    let remaining = status.remaining;
    let period = config.period.label();
    let whole_percent = percentage.round();

    let (level, message) = if percentage >= Decimal::from(ALERT_EXCEEDED_THRESHOLD) {
        (
            AlertLevel::Danger,
            format!(
                "Budget Alert: You've exceeded your {} budget by {}!",
                period,
                format_currency(remaining.abs())
            ),
        )
    } else if percentage >= Decimal::from(ALERT_WARNING_THRESHOLD) {
        (
            AlertLevel::Warning,
            format!(
                "Budget Warning: You've used {}% of your {} budget. Only {} remaining!",
                whole_percent,
                period,
                format_currency(remaining)
            ),
        )
    } else if percentage >= Decimal::from(ALERT_NOTICE_THRESHOLD) {
        (
            AlertLevel::Info,
            format!(
                "Budget Notice: You've used {}% of your {} budget ({} left).",
                whole_percent,
                period,
                format_currency(remaining)
            ),
        )
    } else {
        return None;
    };

    Some(BudgetAlert {
        level,
        percentage,
        remaining,
        message,
    })
}
