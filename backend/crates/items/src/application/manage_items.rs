//! Manage Items Use Case

use std::sync::Arc;

use crate::domain::entity::{Item, ItemValue};
use crate::domain::repository::ItemRepository;
use crate::error::{ItemError, ItemResult};

pub struct ManageItemsUseCase<R>
where
    R: ItemRepository,
{
    repo: Arc<R>,
}

impl<R> ManageItemsUseCase<R>
where
    R: ItemRepository + Sync,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> ItemResult<Vec<Item>> {
        self.repo.list().await
    }

    pub async fn create(&self, raw_value: String) -> ItemResult<Item> {
        let value = ItemValue::new(raw_value)?;
        let item = self.repo.create(&value).await?;

        tracing::info!(item_id = item.id, "Item created");

        Ok(item)
    }

    pub async fn update(&self, id: i64, raw_value: String) -> ItemResult<Item> {
        let value = ItemValue::new(raw_value)?;
        let item = self
            .repo
            .update(id, &value)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        tracing::info!(item_id = id, "Item updated");

        Ok(item)
    }

    pub async fn delete(&self, id: i64) -> ItemResult<()> {
        if !self.repo.delete(id).await? {
            return Err(ItemError::NotFound(id));
        }

        tracing::info!(item_id = id, "Item deleted");

        Ok(())
    }
}
