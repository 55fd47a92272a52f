use super::SettingsRepositoryTrait;
use crate::constants::{THEME_DARK, THEME_LIGHT};
use crate::errors::{Result, ValidationError};
use crate::settings::{Settings, SettingsUpdate};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    fn get_settings(&self) -> Result<Settings>;

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<Settings>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<Settings> {
        self.settings_repository.get_settings()
    }

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<Settings> {
        if let Some(ref theme) = new_settings.theme {
            if theme != THEME_LIGHT && theme != THEME_DARK {
                return Err(ValidationError::InvalidInput(format!(
                    "unknown theme '{}'",
                    theme
                ))
                .into());
            }
        }

        debug!("Updating settings: {:?}", new_settings);
        self.settings_repository
            .update_settings(new_settings)
            .await?;
        self.settings_repository.get_settings()
    }
}
