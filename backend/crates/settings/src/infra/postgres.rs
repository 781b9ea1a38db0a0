//! PostgreSQL Config Source

use sqlx::PgPool;

use crate::domain::{ConfigEntry, ConfigSource};
use crate::error::SettingsResult;

/// Reads the `config` table
#[derive(Clone)]
pub struct PgConfigSource {
    pool: PgPool,
}

impl PgConfigSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ConfigSource for PgConfigSource {
    async fn load_all(&self) -> SettingsResult<Vec<ConfigEntry>> {
        let rows = sqlx::query_as::<_, ConfigRow>(
            r#"SELECT "key", "value" FROM config ORDER BY "key""#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ConfigRow::into_entry).collect())
    }
}

#[derive(sqlx::FromRow)]
struct ConfigRow {
    key: String,
    value: String,
}

impl ConfigRow {
    fn into_entry(self) -> ConfigEntry {
        ConfigEntry {
            key: self.key,
            value: self.value,
        }
    }
}
