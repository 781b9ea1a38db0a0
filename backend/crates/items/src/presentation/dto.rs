//! API DTOs

use serde::{Deserialize, Serialize};

use crate::domain::entity::Item;

/// Body for add and update
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRequest {
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemResponse {
    pub id: i64,
    pub value: String,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            value: item.value,
        }
    }
}
