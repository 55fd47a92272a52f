//! Settings module - user preferences and their persistence seam.

mod settings_model;
mod settings_service;
mod settings_traits;

pub use settings_model::{Settings, SettingsUpdate};
pub use settings_service::{SettingsService, SettingsServiceTrait};
pub use settings_traits::SettingsRepositoryTrait;
