//! Settings persistence collaborator
//!
//! The per-user settings document lives in a hosted document store; the
//! playback core only reads and writes it through this trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Result, SpotonError};
use crate::types::UserSettings;

/// Per-user settings persistence
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the settings document for a user
    ///
    /// Users without a stored document get the defaults.
    async fn load(&self, user_id: &str) -> Result<UserSettings>;

    /// Persist the settings document for a user
    async fn save(&self, user_id: &str, settings: &UserSettings) -> Result<()>;
}

/// In-memory settings store for hosts without remote persistence and for
/// tests
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    documents: Mutex<HashMap<String, UserSettings>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self, user_id: &str) -> Result<UserSettings> {
        let documents = self
            .documents
            .lock()
            .map_err(|_| SpotonError::settings("settings store poisoned"))?;
        Ok(documents.get(user_id).cloned().unwrap_or_default())
    }

    async fn save(&self, user_id: &str, settings: &UserSettings) -> Result<()> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| SpotonError::settings("settings store poisoned"))?;
        documents.insert(user_id.to_string(), settings.clone());
        Ok(())
    }
}
