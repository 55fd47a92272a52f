//! Budget domain models.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{STATUS_DANGER_THRESHOLD, STATUS_WARNING_THRESHOLD};
use crate::utils::time_utils::{
    end_of_month, end_of_year, start_of_month, start_of_week, start_of_year,
};

/// Window over which spending is aggregated against the budget total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    /// Returns the database string representation (SCREAMING_SNAKE_CASE).
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "WEEKLY",
            BudgetPeriod::Monthly => "MONTHLY",
            BudgetPeriod::Yearly => "YEARLY",
        }
    }

    /// Parses a period from its database string.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "WEEKLY" => Some(BudgetPeriod::Weekly),
            "MONTHLY" => Some(BudgetPeriod::Monthly),
            "YEARLY" => Some(BudgetPeriod::Yearly),
            _ => None,
        }
    }

    /// Lowercase label used in user-facing messages ("monthly budget").
    pub const fn label(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }

    /// Inclusive first and last day of the period containing `as_of`.
    ///
    /// Weeks run Monday through Sunday.
    pub fn bounds(&self, as_of: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            BudgetPeriod::Weekly => {
                let start = start_of_week(as_of);
                (start, start + chrono::Days::new(6))
            }
            BudgetPeriod::Monthly => (start_of_month(as_of), end_of_month(as_of)),
            BudgetPeriod::Yearly => (start_of_year(as_of), end_of_year(as_of)),
        }
    }
}

/// The budget configuration: a total limit plus optional per-category caps.
///
/// A stored config always satisfies `sum(category_limits) <= total_limit`
/// and holds only positive category limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConfig {
    pub total_limit: Decimal,
    #[serde(default)]
    pub category_limits: BTreeMap<String, Decimal>,
    #[serde(default = "default_alerts_enabled")]
    pub alerts_enabled: bool,
    #[serde(default)]
    pub period: BudgetPeriod,
}

fn default_alerts_enabled() -> bool {
    true
}

impl BudgetConfig {
    pub fn new(total_limit: Decimal) -> Self {
        Self {
            total_limit,
            category_limits: BTreeMap::new(),
            alerts_enabled: true,
            period: BudgetPeriod::default(),
        }
    }

    pub fn with_category_limit(mut self, category: impl Into<String>, limit: Decimal) -> Self {
        self.category_limits.insert(category.into(), limit);
        self
    }

    pub fn with_alerts(mut self, enabled: bool) -> Self {
        self.alerts_enabled = enabled;
        self
    }

    pub fn with_period(mut self, period: BudgetPeriod) -> Self {
        self.period = period;
        self
    }

    /// Sum of all category limits, saturating at `Decimal::MAX`.
    pub fn total_category_limits(&self) -> Decimal {
        self.category_limits
            .values()
            .fold(Decimal::ZERO, |sum, limit| sum.saturating_add(*limit))
    }

    /// Limit for `category`, zero meaning unlimited.
    pub fn limit_for(&self, category: &str) -> Decimal {
        self.category_limits
            .get(category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Presentation band derived from a percentage of a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusBand {
    #[default]
    Ok,
    Warning,
    Danger,
}

impl StatusBand {
    /// `< 70` is OK, `70..90` is WARNING, `>= 90` is DANGER.
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage >= Decimal::from(STATUS_DANGER_THRESHOLD) {
            StatusBand::Danger
        } else if percentage >= Decimal::from(STATUS_WARNING_THRESHOLD) {
            StatusBand::Warning
        } else {
            StatusBand::Ok
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            StatusBand::Ok => "ok",
            StatusBand::Warning => "warning",
            StatusBand::Danger => "danger",
        }
    }
}

impl fmt::Display for StatusBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spend of one category within the current period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub name: String,
    /// Zero means the category has no limit.
    pub limit: Decimal,
    pub spent: Decimal,
    pub percentage: Decimal,
    pub is_over_budget: bool,
    pub band: StatusBand,
}

impl CategorySpend {
    pub fn is_unlimited(&self) -> bool {
        self.limit.is_zero()
    }
}

/// Derived view of a budget against the current ledger snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub has_budget: bool,
    pub total_limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub is_over_budget: bool,
    pub band: StatusBand,
    pub categories: Vec<CategorySpend>,
}

impl BudgetStatus {
    /// Status reported when no budget is configured.
    pub fn unconfigured() -> Self {
        Self {
            has_budget: false,
            total_limit: Decimal::ZERO,
            spent: Decimal::ZERO,
            remaining: Decimal::ZERO,
            percentage: Decimal::ZERO,
            is_over_budget: false,
            band: StatusBand::Ok,
            categories: Vec::new(),
        }
    }

    pub fn category(&self, name: &str) -> Option<&CategorySpend> {
        self.categories.iter().find(|c| c.name == name)
    }
}

/// Severity of a spending alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    Info,
    Warning,
    Danger,
}

/// Alert raised after an expense pushes spending past a threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub level: AlertLevel,
    pub percentage: Decimal,
    pub remaining: Decimal,
    pub message: String,
}
