//! Settings - database-backed runtime configuration
//!
//! - `domain/` - `ConfigEntry` and the `ConfigSource` port
//! - `application/` - `ConfigCache`, the once-loaded read-mostly map
//! - `infra/` - PostgreSQL and in-memory sources
//!
//! ## Loading model
//! The `config` table is read exactly once per process. The composition root
//! calls [`ConfigCache::load`] before serving; a failure there aborts startup.
//! Concurrent first use of a cache that was not preloaded still triggers a
//! single read, and every caller sees the same fully populated map.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

pub use application::cache::ConfigCache;
pub use domain::{ConfigEntry, ConfigSource};
pub use error::{SettingsError, SettingsResult};
pub use infra::{memory::StaticConfigSource, postgres::PgConfigSource};

/// Well-known keys read by the application
pub mod keys {
    /// Title shown on rendered pages
    pub const SITE_NAME: &str = "site_name";
    /// Role assigned to newly registered users
    pub const DEFAULT_ROLE_ID: &str = "default_role_id";
}
