//! Conversions between domain values and their SQLite text encodings.
//!
//! Amounts are stored as decimal text so no precision is lost, and dates as
//! ISO-8601 `YYYY-MM-DD` so that lexical comparison matches date order.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::StorageError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn decimal_to_text(value: Decimal) -> String {
    value.normalize().to_string()
}

pub fn text_to_decimal(column: &str, raw: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw.trim())
        .map_err(|e| StorageError::CorruptValue(format!("{} '{}': {}", column, raw, e)))
}

pub fn date_to_text(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn text_to_date(column: &str, raw: &str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| StorageError::CorruptValue(format!("{} '{}': {}", column, raw, e)))
}
