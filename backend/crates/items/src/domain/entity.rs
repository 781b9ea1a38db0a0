//! Item Entity

use crate::error::{ItemError, ItemResult};

/// Stored item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub value: String,
}

/// Non-blank item payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemValue(String);

impl ItemValue {
    pub fn new(raw: impl Into<String>) -> ItemResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ItemError::EmptyValue);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
