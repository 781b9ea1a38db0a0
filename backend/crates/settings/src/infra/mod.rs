//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::StaticConfigSource;
pub use postgres::PgConfigSource;
