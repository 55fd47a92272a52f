use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::category_model::{Category, CategoryUpdate, NewCategory};
use super::category_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::ledger::EntryKind;

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { repository }
    }

    /// Fails when another category of `kind` already uses `name`.
    fn ensure_unique(&self, name: &str, kind: EntryKind, except_id: Option<&str>) -> Result<()> {
        match self.repository.find_category(name, kind)? {
            Some(existing) if Some(existing.id.as_str()) != except_id => {
                Err(ValidationError::InvalidInput(format!(
                    "{} category '{}' already exists",
                    kind.as_db_str().to_lowercase(),
                    existing.name
                ))
                .into())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn get_categories(&self, kind: Option<EntryKind>) -> Result<Vec<Category>> {
        self.repository.get_categories(kind)
    }

    fn get_category_usage(&self, category_id: &str) -> Result<i64> {
        let category = self.repository.get_category(category_id)?;
        self.repository.count_transactions(&category)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        let validated = new_category.validate()?;
        self.ensure_unique(&validated.name, validated.kind, None)?;
        debug!("Creating {} category '{}'", validated.kind.as_db_str(), validated.name);
        self.repository.create_category(validated).await
    }

    async fn update_category(&self, category_id: &str, update: CategoryUpdate) -> Result<Category> {
        let validated = update.validate()?;
        let existing = self.repository.get_category(category_id)?;
        self.ensure_unique(&validated.name, existing.kind, Some(category_id))?;
        if existing.name != validated.name {
            info!("Renaming category '{}' to '{}'", existing.name, validated.name);
        }
        self.repository.update_category(category_id, validated).await
    }

    async fn delete_category(&self, category_id: &str) -> Result<()> {
        let removed = self.repository.delete_category(category_id).await?;
        if removed == 0 {
            return Err(Error::NotFound(format!("Category {} not found", category_id)));
        }
        info!("Deleted category {}", category_id);
        Ok(())
    }
}
