//! In-memory Repository
//!
//! Same contract as the PostgreSQL repository, used by router tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::{Item, ItemValue};
use crate::domain::repository::ItemRepository;
use crate::error::ItemResult;

#[derive(Clone, Default)]
pub struct InMemoryItemRepository {
    inner: Arc<RwLock<Table>>,
}

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, String>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemRepository for InMemoryItemRepository {
    async fn list(&self) -> ItemResult<Vec<Item>> {
        let table = self.inner.read().await;
        Ok(table
            .rows
            .iter()
            .map(|(id, value)| Item {
                id: *id,
                value: value.clone(),
            })
            .collect())
    }

    async fn create(&self, value: &ItemValue) -> ItemResult<Item> {
        let mut table = self.inner.write().await;
        table.next_id += 1;
        let id = table.next_id;
        table.rows.insert(id, value.as_str().to_string());
        Ok(Item {
            id,
            value: value.as_str().to_string(),
        })
    }

    async fn update(&self, id: i64, value: &ItemValue) -> ItemResult<Option<Item>> {
        let mut table = self.inner.write().await;
        Ok(table.rows.get_mut(&id).map(|stored| {
            *stored = value.as_str().to_string();
            Item {
                id,
                value: stored.clone(),
            }
        }))
    }

    async fn delete(&self, id: i64) -> ItemResult<bool> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }
}
