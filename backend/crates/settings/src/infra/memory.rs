//! In-memory Config Source

use crate::domain::{ConfigEntry, ConfigSource};
use crate::error::SettingsResult;

/// Fixed set of entries, for tests and database-less composition
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    entries: Vec<ConfigEntry>,
}

impl StaticConfigSource {
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| ConfigEntry::new(k, v))
                .collect(),
        }
    }
}

impl ConfigSource for StaticConfigSource {
    async fn load_all(&self) -> SettingsResult<Vec<ConfigEntry>> {
        Ok(self.entries.clone())
    }
}
