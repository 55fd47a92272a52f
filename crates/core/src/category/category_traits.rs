use async_trait::async_trait;

use super::category_model::{Category, CategoryUpdate, NewCategory};
use crate::errors::Result;
use crate::ledger::EntryKind;

/// Trait for category repository operations
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Categories ordered by kind, then name. `None` lists both kinds.
    fn get_categories(&self, kind: Option<EntryKind>) -> Result<Vec<Category>>;

    fn get_category(&self, category_id: &str) -> Result<Category>;

    /// Case-insensitive lookup within one kind.
    fn find_category(&self, name: &str, kind: EntryKind) -> Result<Option<Category>>;

    /// Number of transactions filed under the category's name and kind.
    fn count_transactions(&self, category: &Category) -> Result<i64>;

    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;

    /// Applies `update` and moves the category's transactions to the new
    /// name in the same write.
    async fn update_category(&self, category_id: &str, update: CategoryUpdate)
        -> Result<Category>;

    /// Returns the number of categories removed (0 or 1).
    async fn delete_category(&self, category_id: &str) -> Result<usize>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn get_categories(&self, kind: Option<EntryKind>) -> Result<Vec<Category>>;

    fn get_category_usage(&self, category_id: &str) -> Result<i64>;

    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;

    async fn update_category(&self, category_id: &str, update: CategoryUpdate)
        -> Result<Category>;

    async fn delete_category(&self, category_id: &str) -> Result<()>;
}
