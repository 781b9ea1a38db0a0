//! Domain Layer

pub mod entry;
pub mod source;

pub use entry::ConfigEntry;
pub use source::{ConfigSource, LocalConfigSource};
