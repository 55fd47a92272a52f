//! Repository traits for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::{Settings, SettingsUpdate};

/// Repository trait for managing user preferences.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get all settings, with defaults for keys never written.
    fn get_settings(&self) -> Result<Settings>;

    /// Update multiple settings at once.
    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()>;
}
