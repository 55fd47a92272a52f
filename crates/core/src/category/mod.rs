//! Category module - named income and expense buckets used by transactions.

mod category_model;
mod category_service;
mod category_traits;

pub use category_model::{Category, CategoryUpdate, NewCategory};
pub use category_service::CategoryService;
pub use category_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
