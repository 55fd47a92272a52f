//! Pure status computation for a budget against a ledger snapshot.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::budget_model::{BudgetConfig, BudgetStatus, CategorySpend, StatusBand};
use crate::ledger::{EntryKind, LedgerEntry};
use crate::utils::percentage_of;

/// Computes the status of `config` against `ledger`.
///
/// The ledger must already be scoped to the budget period. Income entries
/// are ignored and sums saturate rather than overflow. Categories with a limit or with any expense appear once,
/// highest spend first, ties broken by name.
pub fn compute_status(config: Option<&BudgetConfig>, ledger: &[LedgerEntry]) -> BudgetStatus {
    let Some(config) = config else {
        return BudgetStatus::unconfigured();
    };

    let mut spent = Decimal::ZERO;
    let mut spent_by_category: HashMap<&str, Decimal> = HashMap::new();
    for entry in ledger.iter().filter(|e| e.kind == EntryKind::Expense) {
        spent = spent.saturating_add(entry.amount);
        let category_spent = spent_by_category
            .entry(entry.category.as_str())
            .or_insert(Decimal::ZERO);
        *category_spent = category_spent.saturating_add(entry.amount);
    }

    for name in config.category_limits.keys() {
        spent_by_category
            .entry(name.as_str())
            .or_insert(Decimal::ZERO);
    }

    let mut categories: Vec<CategorySpend> = spent_by_category
        .into_iter()
        .map(|(name, category_spent)| category_spend(name, config.limit_for(name), category_spent))
        .collect();
    categories.sort_by(|a, b| b.spent.cmp(&a.spent).then_with(|| a.name.cmp(&b.name)));

    let percentage = percentage_of(spent, config.total_limit);
    BudgetStatus {
        has_budget: true,
        total_limit: config.total_limit,
        spent,
        remaining: config.total_limit.saturating_sub(spent),
        percentage,
        is_over_budget: spent > config.total_limit,
        band: StatusBand::from_percentage(percentage),
        categories,
    }
}

fn category_spend(name: &str, limit: Decimal, spent: Decimal) -> CategorySpend {
    if limit <= Decimal::ZERO {
        return CategorySpend {
            name: name.to_string(),
            limit: Decimal::ZERO,
            spent,
            percentage: Decimal::ZERO,
            is_over_budget: false,
            band: StatusBand::Ok,
        };
    }

    let percentage = percentage_of(spent, limit);
    CategorySpend {
        name: name.to_string(),
        limit,
        spent,
        percentage,
        is_over_budget: spent > limit,
        band: StatusBand::from_percentage(percentage),
    }
}
