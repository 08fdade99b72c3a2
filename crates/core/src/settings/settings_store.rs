//! Settings storage.

use std::sync::RwLock;

use async_trait::async_trait;
use log::debug;

use crate::errors::{Error, Result};
use crate::settings::{ApiKeysUpdate, Settings};

/// Store for user settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Get all settings.
    fn get_settings(&self) -> Result<Settings>;

    /// Apply a partial API key update and return the new settings.
    async fn update_api_keys(&self, update: &ApiKeysUpdate) -> Result<Settings>;

    /// Trimmed vendor key, if configured.
    fn vendor_api_key(&self) -> Result<Option<String>> {
        Ok(self.get_settings()?.vendor_api_key().map(str::to_string))
    }

    /// Trimmed lookup service key, if configured.
    fn lookup_api_key(&self) -> Result<Option<String>> {
        Ok(self.get_settings()?.lookup_api_key().map(str::to_string))
    }
}

/// Process-local settings store.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    settings: RwLock<Settings>,
}

impl InMemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    fn get_settings(&self) -> Result<Settings> {
        self.settings
            .read()
            .map(|settings| settings.clone())
            .map_err(|_| Error::Settings("settings lock poisoned".to_string()))
    }

    async fn update_api_keys(&self, update: &ApiKeysUpdate) -> Result<Settings> {
        let mut settings = self
            .settings
            .write()
            .map_err(|_| Error::Settings("settings lock poisoned".to_string()))?;
        update.apply(&mut settings.api_keys);
        debug!(
            "API keys updated (alpha_vantage set: {}, huggingface set: {})",
            settings.api_keys.alpha_vantage.is_some(),
            settings.api_keys.huggingface.is_some()
        );
        Ok(settings.clone())
    }
}
