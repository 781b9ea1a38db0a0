//! Config Source Port

use crate::domain::entry::ConfigEntry;
use crate::error::SettingsResult;

/// Bulk reader for persisted configuration rows
#[trait_variant::make(ConfigSource: Send)]
pub trait LocalConfigSource {
    /// Read every key/value row
    async fn load_all(&self) -> SettingsResult<Vec<ConfigEntry>>;
}
