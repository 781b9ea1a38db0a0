//! Application Layer

pub mod cache;

pub use cache::ConfigCache;
