use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{DISPLAY_DECIMAL_PRECISION, PERCENTAGE_DECIMAL_PRECISION};

/// Formats an amount as dollars with two decimals, e.g. `$1,234.50`.
///
/// Negative amounts keep their sign in front of the symbol (`-$12.00`).
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded);
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, fraction)
}

/// `100 * part / whole`, rounded to one decimal place.
///
/// Returns zero when `whole` is not positive. Results too large for a
/// `Decimal` saturate at `Decimal::MAX` (or `MIN` for a negative part).
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let percentage = match part.checked_mul(Decimal::ONE_HUNDRED) {
        Some(scaled) => scaled.checked_div(whole),
        None => part
            .checked_div(whole)
            .map(|ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED)),
    };
    let percentage = percentage.unwrap_or(if part.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    });
    percentage.round_dp_with_strategy(
        PERCENTAGE_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}
