pub mod money_utils;
pub mod time_utils;

pub use money_utils::{format_currency, percentage_of};
