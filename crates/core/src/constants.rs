use rust_decimal::Decimal;

/// Percentage at which a budget or category moves from `OK` to `WARNING`.
pub const STATUS_WARNING_THRESHOLD: u32 = 70;

/// Percentage at which a budget or category moves to `DANGER`.
pub const STATUS_DANGER_THRESHOLD: u32 = 90;

/// Spending alert thresholds (percent of the total budget).
pub const ALERT_NOTICE_THRESHOLD: u32 = 75;
pub const ALERT_WARNING_THRESHOLD: u32 = 90;
pub const ALERT_EXCEEDED_THRESHOLD: u32 = 100;

/// Largest amount accepted for a budget limit or a transaction
/// (1,000,000,000,000).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision of reported percentages
pub const PERCENTAGE_DECIMAL_PRECISION: u32 = 1;

/// Transaction listing page sizes
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Theme names accepted by the settings service
pub const THEME_LIGHT: &str = "light";
pub const THEME_DARK: &str = "dark";
