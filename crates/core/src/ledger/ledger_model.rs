//! Ledger domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_AMOUNT, MAX_PAGE_SIZE};
use crate::errors::{Result, ValidationError};

/// Whether an amount flows in or out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Returns the database string representation (SCREAMING_SNAKE_CASE).
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "INCOME",
            EntryKind::Expense => "EXPENSE",
        }
    }

    /// Parses an entry kind from its database string.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "INCOME" => Some(EntryKind::Income),
            "EXPENSE" => Some(EntryKind::Expense),
            _ => None,
        }
    }
}

/// A categorized amount within the current budget period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub category: String,
    pub amount: Decimal,
    pub kind: EntryKind,
}

impl LedgerEntry {
    pub fn expense(category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            category: category.into(),
            amount,
            kind: EntryKind::Expense,
        }
    }

    pub fn income(category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            category: category.into(),
            amount,
            kind: EntryKind::Income,
        }
    }
}

/// Domain model for a recorded transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub kind: EntryKind,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl From<&Transaction> for LedgerEntry {
    fn from(transaction: &Transaction) -> Self {
        Self {
            category: transaction.category.clone(),
            amount: transaction.amount,
            kind: transaction.kind,
        }
    }
}

/// Input model for recording a new transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub name: String,
    pub amount: Decimal,
    pub kind: EntryKind,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl NewTransaction {
    /// Checks required fields, caps the amount at `MAX_AMOUNT` and trims text input.
    ///
    /// Blank notes are normalized to `None`.
    pub fn validate(mut self) -> Result<Self> {
        self.name = required_text("name", &self.name)?;
        check_amount(self.amount)?;
        self.category = required_text("category", &self.category)?;
        self.notes = optional_text(self.notes);
        Ok(self)
    }
}

/// Input model for correcting a recorded transaction. The kind and date
/// stay as recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub name: String,
    pub amount: Decimal,
    pub category: String,
    pub notes: Option<String>,
}

impl TransactionUpdate {
    /// Same rules as [`NewTransaction::validate`].
    pub fn validate(mut self) -> Result<Self> {
        self.name = required_text("name", &self.name)?;
        check_amount(self.amount)?;
        self.category = required_text("category", &self.category)?;
        self.notes = optional_text(self.notes);
        Ok(self)
    }
}

fn required_text(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()).into());
    }
    Ok(value.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn check_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount(format!(
            "transaction amount must be positive, got {}",
            amount
        ))
        .into());
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::InvalidAmount(format!(
            "transaction amount must not exceed {}, got {}",
            MAX_AMOUNT, amount
        ))
        .into());
    }
    Ok(())
}

/// Order of a transaction listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionSort {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl TransactionSort {
    /// Parses the query-string form, e.g. `amount-desc`.
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "date-desc" => Some(TransactionSort::DateDesc),
            "date-asc" => Some(TransactionSort::DateAsc),
            "amount-desc" => Some(TransactionSort::AmountDesc),
            "amount-asc" => Some(TransactionSort::AmountAsc),
            _ => None,
        }
    }
}

/// Which transactions a listing includes. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Option<EntryKind>,
    pub category: Option<String>,
    /// Earliest date included.
    pub since: Option<NaiveDate>,
    /// Case-insensitive substring of the name or the notes.
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if self.kind.is_some_and(|kind| kind != transaction.kind) {
            return false;
        }
        if self
            .category
            .as_ref()
            .is_some_and(|category| *category != transaction.category)
        {
            return false;
        }
        if self.since.is_some_and(|since| transaction.date < since) {
            return false;
        }
        match self.search.as_deref().map(str::to_lowercase) {
            Some(needle) => {
                transaction.name.to_lowercase().contains(&needle)
                    || transaction
                        .notes
                        .as_deref()
                        .is_some_and(|notes| notes.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

/// A filtered, sorted and paged transaction listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub filter: TransactionFilter,
    pub sort: TransactionSort,
    /// 1-based.
    pub page: u32,
    pub per_page: u32,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            filter: TransactionFilter::default(),
            sort: TransactionSort::default(),
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Totals over every transaction a filter matched, not just one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,
    pub count: usize,
}

impl TransactionSummary {
    pub fn of(transactions: &[Transaction]) -> Self {
        let (total_income, total_expense) = transactions.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expense), tx| match tx.kind {
                EntryKind::Income => (income.saturating_add(tx.amount), expense),
                EntryKind::Expense => (income, expense.saturating_add(tx.amount)),
            },
        );
        Self {
            total_income,
            total_expense,
            net: total_income.saturating_sub(total_expense),
            count: transactions.len(),
        }
    }
}

/// One page of a transaction listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub summary: TransactionSummary,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total_items: usize,
}

impl TransactionPage {
    /// Sorts `matched` and cuts out the requested page.
    ///
    /// `page` is clamped to at least 1 and `per_page` to `1..=MAX_PAGE_SIZE`.
    /// Sorting is stable, so equal keys keep the order they arrived in.
    pub fn paginate(
        mut matched: Vec<Transaction>,
        sort: TransactionSort,
        page: u32,
        per_page: u32,
    ) -> Self {
        let page = page.max(1);
        let per_page = per_page.clamp(1, MAX_PAGE_SIZE);
        let summary = TransactionSummary::of(&matched);

        match sort {
            TransactionSort::DateDesc => matched.sort_by(|a, b| b.date.cmp(&a.date)),
            TransactionSort::DateAsc => matched.sort_by(|a, b| a.date.cmp(&b.date)),
            TransactionSort::AmountDesc => matched.sort_by(|a, b| b.amount.cmp(&a.amount)),
            TransactionSort::AmountAsc => matched.sort_by(|a, b| a.amount.cmp(&b.amount)),
        }

        let total_items = matched.len();
        let total_pages = total_items.div_ceil(per_page as usize) as u32;
        let transactions = matched
            .into_iter()
            .skip((page as usize - 1).saturating_mul(per_page as usize))
            .take(per_page as usize)
            .collect();

        Self {
            transactions,
            summary,
            page,
            per_page,
            total_pages,
            total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use rust_decimal_macros::dec;

    fn groceries() -> NewTransaction {
        NewTransaction {
            name: "  Groceries ".to_string(),
            amount: dec!(42.10),
            kind: EntryKind::Expense,
            category: " Food".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            notes: Some("   ".to_string()),
        }
    }

    #[test]
    fn validate_trims_and_normalizes() {
        let tx = groceries().validate().unwrap();
        assert_eq!(tx.name, "Groceries");
        assert_eq!(tx.category, "Food");
        assert_eq!(tx.notes, None);
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut tx = groceries();
        tx.name = "   ".to_string();
        assert!(matches!(
            tx.validate(),
            Err(Error::Validation(ValidationError::MissingField(field))) if field == "name"
        ));
    }

    #[test]
    fn validate_rejects_non_positive_amount() {
        for amount in [dec!(0), dec!(-3)] {
            let mut tx = groceries();
            tx.amount = amount;
            assert!(matches!(
                tx.validate(),
                Err(Error::Validation(ValidationError::InvalidAmount(_)))
            ));
        }
    }

    #[test]
    fn validate_caps_amount_at_the_maximum() {
        let mut tx = groceries();
        tx.amount = MAX_AMOUNT;
        assert!(tx.validate().is_ok());

        let mut tx = groceries();
        tx.amount = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        assert!(matches!(
            tx.validate(),
            Err(Error::Validation(ValidationError::InvalidAmount(_)))
        ));
    }

    #[test]
    fn validate_rejects_missing_category() {
        let mut tx = groceries();
        tx.category = String::new();
        assert!(matches!(
            tx.validate(),
            Err(Error::Validation(ValidationError::MissingField(field))) if field == "category"
        ));
    }

    #[test]
    fn kind_round_trips_through_db_string() {
        assert_eq!(EntryKind::from_db_str("EXPENSE"), Some(EntryKind::Expense));
        assert_eq!(EntryKind::from_db_str(EntryKind::Income.as_db_str()), Some(EntryKind::Income));
        assert_eq!(EntryKind::from_db_str("TRANSFER"), None);
    }

    fn recorded(id: &str, name: &str, amount: Decimal, kind: EntryKind, day: u32) -> Transaction {
        Transaction {
            id: id.to_string(),
            name: name.to_string(),
            amount,
            kind,
            category: if kind == EntryKind::Income { "Salary" } else { "Food" }.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            notes: None,
        }
    }

    fn history() -> Vec<Transaction> {
        vec![
            recorded("a", "Lunch", dec!(12), EntryKind::Expense, 3),
            recorded("b", "Paycheck", dec!(2000), EntryKind::Income, 1),
            recorded("c", "Dinner", dec!(40), EntryKind::Expense, 9),
            recorded("d", "Snacks", dec!(5), EntryKind::Expense, 9),
            recorded("e", "Groceries", dec!(88.5), EntryKind::Expense, 6),
        ]
    }

    #[test]
    fn update_follows_the_same_rules_as_new_transactions() {
        let update = TransactionUpdate {
            name: " Rent ".to_string(),
            amount: dec!(900),
            category: " Bills ".to_string(),
            notes: Some(" ".to_string()),
        };
        let validated = update.clone().validate().unwrap();
        assert_eq!(validated.name, "Rent");
        assert_eq!(validated.category, "Bills");
        assert_eq!(validated.notes, None);

        let mut negative = update.clone();
        negative.amount = dec!(-1);
        assert!(matches!(
            negative.validate(),
            Err(Error::Validation(ValidationError::InvalidAmount(_)))
        ));

        let mut huge = update;
        huge.amount = MAX_AMOUNT + dec!(1);
        assert!(matches!(
            huge.validate(),
            Err(Error::Validation(ValidationError::InvalidAmount(_)))
        ));
    }

    #[test]
    fn filter_matches_kind_category_date_and_search() {
        let mut lunch = recorded("a", "Lunch", dec!(12), EntryKind::Expense, 3);
        lunch.notes = Some("With the TEAM".to_string());

        assert!(TransactionFilter::default().matches(&lunch));

        let by_kind = TransactionFilter {
            kind: Some(EntryKind::Income),
            ..Default::default()
        };
        assert!(!by_kind.matches(&lunch));

        let by_category = TransactionFilter {
            category: Some("Food".to_string()),
            ..Default::default()
        };
        assert!(by_category.matches(&lunch));

        let since = |day| TransactionFilter {
            since: NaiveDate::from_ymd_opt(2024, 5, day),
            ..Default::default()
        };
        assert!(since(3).matches(&lunch));
        assert!(!since(4).matches(&lunch));

        let search = |needle: &str| TransactionFilter {
            search: Some(needle.to_string()),
            ..Default::default()
        };
        assert!(search("lun").matches(&lunch));
        assert!(search("team").matches(&lunch));
        assert!(!search("dinner").matches(&lunch));
    }

    #[test]
    fn paginate_sorts_then_slices_and_summarizes_everything() {
        let page = TransactionPage::paginate(history(), TransactionSort::DateDesc, 1, 2);

        let ids: Vec<&str> = page.transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d"]);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.summary.count, 5);
        assert_eq!(page.summary.total_income, dec!(2000));
        assert_eq!(page.summary.total_expense, dec!(145.5));
        assert_eq!(page.summary.net, dec!(1854.5));

        let last = TransactionPage::paginate(history(), TransactionSort::DateDesc, 3, 2);
        let ids: Vec<&str> = last.transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);

        let beyond = TransactionPage::paginate(history(), TransactionSort::DateDesc, 9, 2);
        assert!(beyond.transactions.is_empty());
        assert_eq!(beyond.summary.count, 5);
    }

    #[test]
    fn paginate_orders_by_amount_and_date() {
        let ids = |sort| {
            TransactionPage::paginate(history(), sort, 1, 10)
                .transactions
                .into_iter()
                .map(|t| t.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(TransactionSort::AmountDesc), vec!["b", "e", "c", "a", "d"]);
        assert_eq!(ids(TransactionSort::AmountAsc), vec!["d", "a", "c", "e", "b"]);
        assert_eq!(ids(TransactionSort::DateAsc), vec!["b", "a", "e", "c", "d"]);
    }

    #[test]
    fn paginate_clamps_page_and_page_size() {
        let page = TransactionPage::paginate(history(), TransactionSort::DateDesc, 0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 1);
        assert_eq!(page.total_pages, 5);

        let page = TransactionPage::paginate(history(), TransactionSort::DateDesc, 1, 10_000);
        assert_eq!(page.per_page, MAX_PAGE_SIZE);
        assert_eq!(page.transactions.len(), 5);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn empty_listing_has_no_pages() {
        let page = TransactionPage::paginate(Vec::new(), TransactionSort::default(), 1, 20);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.summary, TransactionSummary::default());
    }

    #[test]
    fn sort_names_match_query_strings() {
        let sort: TransactionSort = serde_json::from_str("\"amount-desc\"").unwrap();
        assert_eq!(sort, TransactionSort::AmountDesc);
        assert_eq!(TransactionSort::from_param("amount-desc"), Some(sort));
        assert_eq!(TransactionSort::from_param("date-asc"), Some(TransactionSort::DateAsc));
        assert_eq!(TransactionSort::from_param("newest"), None);
    }
}
