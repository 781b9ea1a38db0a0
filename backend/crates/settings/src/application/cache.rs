//! Configuration Cache
//!
//! Process-wide key/value map sourced once from a [`ConfigSource`].

use std::collections::HashMap;
use std::str::FromStr;

use tokio::sync::{OnceCell, RwLock};

use crate::domain::{ConfigEntry, ConfigSource};
use crate::error::{SettingsError, SettingsResult};

/// Read-mostly configuration map with a single initializing load
///
/// - The first caller (or [`ConfigCache::load`]) runs `load_all`; racing
///   callers wait on the same initialization instead of loading again.
/// - A failed load leaves the cell empty, never half filled.
/// - Lookups only take the shared read lock.
pub struct ConfigCache<S> {
    source: S,
    entries: OnceCell<RwLock<HashMap<String, String>>>,
}

impl<S> ConfigCache<S>
where
    S: ConfigSource + Sync,
{
    /// Create an unloaded cache
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: OnceCell::new(),
        }
    }

    /// Create a cache and load it immediately (startup phase)
    pub async fn load(source: S) -> SettingsResult<Self> {
        let cache = Self::new(source);
        cache.entries().await?;
        Ok(cache)
    }

    /// Whether the initial load has completed
    #[cfg(test)]
    pub(crate) fn is_loaded(&self) -> bool {
        self.entries.initialized()
    }

    /// Look up a key; `None` when the key is absent
    pub async fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        let entries = self.entries().await?.read().await;
        Ok(entries.get(key).cloned())
    }

    /// Look up a key, falling back to `default` when absent
    pub async fn get_or(&self, key: &str, default: &str) -> SettingsResult<String> {
        Ok(self
            .get(key)
            .await?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Look up and parse a key
    pub async fn get_parsed<T: FromStr>(&self, key: &str) -> SettingsResult<Option<T>> {
        match self.get(key).await? {
            Some(value) => value
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| SettingsError::InvalidValue {
                    key: key.to_string(),
                    value,
                }),
            None => Ok(None),
        }
    }

    async fn entries(&self) -> SettingsResult<&RwLock<HashMap<String, String>>> {
        self.entries
            .get_or_try_init(|| async {
                let rows = self.source.load_all().await?;
                tracing::info!(entries = rows.len(), "Configuration loaded");
                Ok::<_, SettingsError>(RwLock::new(into_map(rows)))
            })
            .await
    }
}

/// Later rows win on duplicate keys
fn into_map(rows: Vec<ConfigEntry>) -> HashMap<String, String> {
    rows.into_iter().map(|e| (e.key, e.value)).collect()
}
