//! Category domain models.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::ledger::EntryKind;

/// Domain model for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub kind: EntryKind,
    pub color: Option<String>,
}

/// Input model for creating a new category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub kind: EntryKind,
    pub color: Option<String>,
}

/// Input model for renaming or recoloring a category. The kind is fixed
/// once the category exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: String,
    pub color: Option<String>,
}

impl NewCategory {
    pub fn validate(mut self) -> Result<Self> {
        self.name = validate_name(&self.name)?;
        self.color = validate_color(self.color)?;
        Ok(self)
    }
}

impl CategoryUpdate {
    pub fn validate(mut self) -> Result<Self> {
        self.name = validate_name(&self.name)?;
        self.color = validate_color(self.color)?;
        Ok(self)
    }
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("name".to_string()).into());
    }
    Ok(name.to_string())
}

/// Colors are `#rrggbb`, stored lowercase. Blank means no color.
fn validate_color(color: Option<String>) -> Result<Option<String>> {
    let Some(color) = color.map(|c| c.trim().to_ascii_lowercase()) else {
        return Ok(None);
    };
    if color.is_empty() {
        return Ok(None);
    }

    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(ValidationError::InvalidInput(format!(
            "color must look like #rrggbb, got '{}'",
            color
        ))
        .into());
    }
    Ok(Some(color))
}
