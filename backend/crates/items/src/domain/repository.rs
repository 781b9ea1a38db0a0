//! Repository Traits

use crate::domain::entity::{Item, ItemValue};
use crate::error::ItemResult;

#[trait_variant::make(ItemRepository: Send)]
pub trait LocalItemRepository {
    /// All items ordered by id
    async fn list(&self) -> ItemResult<Vec<Item>>;

    /// Insert and return the stored row
    async fn create(&self, value: &ItemValue) -> ItemResult<Item>;

    /// Replace the value; `None` when no row has this id
    async fn update(&self, id: i64, value: &ItemValue) -> ItemResult<Option<Item>>;

    /// Delete by id; `false` when no row was affected
    async fn delete(&self, id: i64) -> ItemResult<bool>;
}
