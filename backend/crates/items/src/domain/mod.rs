//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::{Item, ItemValue};
pub use repository::{ItemRepository, LocalItemRepository};
