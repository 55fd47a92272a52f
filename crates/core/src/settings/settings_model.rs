use serde::{Deserialize, Serialize};

use crate::constants::THEME_LIGHT;

/// Profile preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: String,
    pub budget_warnings: bool,
    pub weekly_reports: bool,
    pub monthly_reports: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: THEME_LIGHT.to_string(),
            budget_warnings: true,
            weekly_reports: false,
            monthly_reports: true,
        }
    }
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub theme: Option<String>,
    pub budget_warnings: Option<bool>,
    pub weekly_reports: Option<bool>,
    pub monthly_reports: Option<bool>,
}

impl SettingsUpdate {
    /// Key/value pairs to write, in storage form.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref theme) = self.theme {
            pairs.push(("theme", theme.clone()));
        }
        if let Some(value) = self.budget_warnings {
            pairs.push(("budget_warnings", value.to_string()));
        }
        if let Some(value) = self.weekly_reports {
            pairs.push(("weekly_reports", value.to_string()));
        }
        if let Some(value) = self.monthly_reports {
            pairs.push(("monthly_reports", value.to_string()));
        }
        pairs
    }
}

impl Settings {
    /// Applies one stored key/value pair. Unknown keys and unparsable
    /// booleans are ignored.
    pub fn apply_pair(&mut self, key: &str, value: &str) {
        match key {
            "theme" => self.theme = value.to_string(),
            "budget_warnings" => {
                self.budget_warnings = value.parse().unwrap_or(self.budget_warnings);
            }
            "weekly_reports" => {
                self.weekly_reports = value.parse().unwrap_or(self.weekly_reports);
            }
            "monthly_reports" => {
                self.monthly_reports = value.parse().unwrap_or(self.monthly_reports);
            }
            _ => {}
        }
    }
}
