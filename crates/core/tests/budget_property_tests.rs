//! Property-based integration tests for budget validation and status.
//!
//! Amounts are generated as whole cents so decimal arithmetic stays exact,
//! except for the huge-amount generators, which span the whole `Decimal`
//! range to exercise the overflow paths.

use proptest::prelude::*;
use rust_decimal::Decimal;
use spendwise_core::budget::{
    compute_status, validate_budget_config, BudgetConfig, BudgetPeriod, StatusBand,
};
use spendwise_core::constants::MAX_AMOUNT;
use spendwise_core::errors::{Error, ValidationError};
use spendwise_core::ledger::{EntryKind, LedgerEntry};

// =============================================================================
// Generators
// =============================================================================

fn arb_amount(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (-max_cents..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_positive_amount(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (1..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

/// Whole amounts anywhere from 1 up to `Decimal::MAX`.
fn arb_huge_amount() -> impl Strategy<Value = Decimal> {
    (1u128..=79_228_162_514_264_337_593_543_950_335u128)
        .prop_map(|units| Decimal::from_i128_with_scale(units as i128, 0))
}

/// Mostly huge, sometimes ordinary, so both sides of `MAX_AMOUNT` show up.
fn arb_any_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![arb_huge_amount(), arb_positive_amount(500_000)]
}

fn arb_category() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Food".to_string()),
        Just("Bills".to_string()),
        Just("Transport".to_string()),
        Just("Fun".to_string()),
        Just("Health".to_string()),
    ]
}

fn arb_period() -> impl Strategy<Value = BudgetPeriod> {
    prop_oneof![
        Just(BudgetPeriod::Weekly),
        Just(BudgetPeriod::Monthly),
        Just(BudgetPeriod::Yearly),
    ]
}

fn arb_candidate() -> impl Strategy<Value = BudgetConfig> {
    (
        arb_amount(500_000),
        proptest::collection::btree_map(arb_category(), arb_amount(300_000), 0..5),
        any::<bool>(),
        arb_period(),
    )
        .prop_map(|(total, limits, alerts, period)| {
            let mut config = BudgetConfig::new(total)
                .with_alerts(alerts)
                .with_period(period);
            config.category_limits = limits;
            config
        })
}

fn arb_entry() -> impl Strategy<Value = LedgerEntry> {
    (arb_category(), arb_positive_amount(200_000), any::<bool>()).prop_map(
        |(category, amount, is_income)| {
            if is_income {
                LedgerEntry::income(category, amount)
            } else {
                LedgerEntry::expense(category, amount)
            }
        },
    )
}

fn arb_ledger(max_len: usize) -> impl Strategy<Value = Vec<LedgerEntry>> {
    proptest::collection::vec(arb_entry(), 0..=max_len)
}

/// Valid configs by construction: at most five categories, each capped at a
/// fifth of the total.
fn arb_valid_config() -> impl Strategy<Value = BudgetConfig> {
    (500i64..=500_000, any::<bool>(), arb_period()).prop_flat_map(|(total_cents, alerts, period)| {
        proptest::collection::btree_map(arb_category(), 1..=total_cents / 5, 0..5).prop_map(
            move |limits| {
                let mut config = BudgetConfig::new(Decimal::new(total_cents, 2))
                    .with_alerts(alerts)
                    .with_period(period);
                for (name, cents) in limits {
                    config = config.with_category_limit(name, Decimal::new(cents, 2));
                }
                config
            },
        )
    })
}

fn arb_huge_candidate() -> impl Strategy<Value = BudgetConfig> {
    (
        arb_any_amount(),
        proptest::collection::btree_map(arb_category(), arb_any_amount(), 0..5),
    )
        .prop_map(|(total, limits)| {
            let mut config = BudgetConfig::new(total);
            config.category_limits = limits;
            config
        })
}

fn arb_huge_ledger() -> impl Strategy<Value = Vec<LedgerEntry>> {
    proptest::collection::vec(
        (arb_category(), arb_any_amount(), any::<bool>()).prop_map(
            |(category, amount, is_income)| {
                if is_income {
                    LedgerEntry::income(category, amount)
                } else {
                    LedgerEntry::expense(category, amount)
                }
            },
        ),
        0..=20,
    )
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Accepted configs never have limits above the total and keep only
    /// positive category limits.
    #[test]
    fn prop_accepted_configs_respect_total(candidate in arb_candidate()) {
        match validate_budget_config(candidate.clone()) {
            Ok(config) => {
                prop_assert!(config.total_limit > Decimal::ZERO);
                prop_assert!(config.total_category_limits() <= config.total_limit);
                prop_assert!(config.category_limits.values().all(|l| *l > Decimal::ZERO));
                for (name, limit) in &config.category_limits {
                    prop_assert_eq!(candidate.category_limits.get(name), Some(limit));
                }
                prop_assert_eq!(config.alerts_enabled, candidate.alerts_enabled);
                prop_assert_eq!(config.period, candidate.period);
            }
            Err(Error::Validation(ValidationError::InvalidAmount(_))) => {
                prop_assert!(candidate.total_limit <= Decimal::ZERO);
            }
            Err(Error::Validation(ValidationError::LimitsExceedTotal {
                total_category_limits,
                total_budget,
            })) => {
                let positive_sum: Decimal = candidate
                    .category_limits
                    .values()
                    .filter(|l| **l > Decimal::ZERO)
                    .copied()
                    .sum();
                prop_assert_eq!(total_category_limits, positive_sum);
                prop_assert_eq!(total_budget, candidate.total_limit);
                prop_assert!(total_category_limits > total_budget);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    /// Spent equals the sum of expense entries and income never counts.
    #[test]
    fn prop_spent_is_sum_of_expenses(
        config in arb_valid_config(),
        ledger in arb_ledger(40),
    ) {
        let status = compute_status(Some(&config), &ledger);

        let expected: Decimal = ledger
            .iter()
            .filter(|e| e.kind == EntryKind::Expense)
            .map(|e| e.amount)
            .sum();

        prop_assert!(status.has_budget);
        prop_assert_eq!(status.spent, expected);
        prop_assert_eq!(status.remaining, config.total_limit - expected);
        prop_assert_eq!(status.is_over_budget, expected > config.total_limit);
        prop_assert_eq!(status.band, StatusBand::from_percentage(status.percentage));

        let category_total: Decimal = status.categories.iter().map(|c| c.spent).sum();
        prop_assert_eq!(category_total, expected);
    }

    /// Unlimited categories are never flagged; limited ones are flagged
    /// exactly when spend exceeds their limit.
    #[test]
    fn prop_category_flags(
        config in arb_valid_config(),
        ledger in arb_ledger(40),
    ) {
        let status = compute_status(Some(&config), &ledger);

        for category in &status.categories {
            if category.limit.is_zero() {
                prop_assert!(!category.is_over_budget);
                prop_assert_eq!(category.band, StatusBand::Ok);
                prop_assert_eq!(category.percentage, Decimal::ZERO);
            } else {
                prop_assert_eq!(category.is_over_budget, category.spent > category.limit);
            }
        }

        for name in config.category_limits.keys() {
            prop_assert!(status.category(name).is_some());
        }

        for pair in status.categories.windows(2) {
            prop_assert!(pair[0].spent >= pair[1].spent);
        }
    }

    /// Status is a pure function of its inputs.
    #[test]
    fn prop_compute_status_is_pure(
        config in arb_valid_config(),
        ledger in arb_ledger(30),
    ) {
        prop_assert_eq!(
            compute_status(Some(&config), &ledger),
            compute_status(Some(&config), &ledger)
        );
    }

    /// Without a config the ledger is irrelevant.
    #[test]
    fn prop_absent_config_is_zeroed(ledger in arb_ledger(30)) {
        let status = compute_status(None, &ledger);
        prop_assert!(!status.has_budget);
        prop_assert_eq!(status.percentage, Decimal::ZERO);
        prop_assert_eq!(status.spent, Decimal::ZERO);
        prop_assert!(status.categories.is_empty());
    }

    /// Amounts anywhere in the `Decimal` range are classified, never panic.
    #[test]
    fn prop_huge_amounts_are_rejected_not_overflowed(candidate in arb_huge_candidate()) {
        let any_limit_too_big = candidate.category_limits.values().any(|l| *l > MAX_AMOUNT);
        match validate_budget_config(candidate.clone()) {
            Ok(config) => {
                prop_assert!(config.total_limit <= MAX_AMOUNT);
                prop_assert!(config.category_limits.values().all(|l| *l <= MAX_AMOUNT));
                prop_assert!(config.total_category_limits() <= config.total_limit);
            }
            Err(Error::Validation(ValidationError::InvalidAmount(_))) => {
                prop_assert!(candidate.total_limit > MAX_AMOUNT || any_limit_too_big);
            }
            Err(Error::Validation(ValidationError::LimitsExceedTotal { .. })) => {
                prop_assert!(candidate.total_limit <= MAX_AMOUNT);
                prop_assert!(!any_limit_too_big);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    /// Status over huge ledgers saturates instead of panicking.
    #[test]
    fn prop_status_survives_huge_ledgers(
        config in arb_valid_config(),
        ledger in arb_huge_ledger(),
    ) {
        let status = compute_status(Some(&config), &ledger);

        let largest_expense = ledger
            .iter()
            .filter(|e| e.kind == EntryKind::Expense)
            .map(|e| e.amount)
            .max()
            .unwrap_or(Decimal::ZERO);
        prop_assert!(status.spent >= largest_expense);
        prop_assert_eq!(status.is_over_budget, status.spent > config.total_limit);
        for category in &status.categories {
            prop_assert!(category.spent <= status.spent);
        }
    }
}
