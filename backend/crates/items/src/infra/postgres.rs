//! PostgreSQL Repository Implementation

use sqlx::PgPool;

use crate::domain::entity::{Item, ItemValue};
use crate::domain::repository::ItemRepository;
use crate::error::ItemResult;

#[derive(Clone)]
pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ItemRepository for PgItemRepository {
    async fn list(&self) -> ItemResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, value
            FROM items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ItemRow::into_item).collect())
    }

    async fn create(&self, value: &ItemValue) -> ItemResult<Item> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO items (value)
            VALUES ($1)
            RETURNING id, value
            "#,
        )
        .bind(value.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_item())
    }

    async fn update(&self, id: i64, value: &ItemValue) -> ItemResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            UPDATE items
            SET value = $2
            WHERE id = $1
            RETURNING id, value
            "#,
        )
        .bind(id)
        .bind(value.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ItemRow::into_item))
    }

    async fn delete(&self, id: i64) -> ItemResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    value: String,
}

impl ItemRow {
    fn into_item(self) -> Item {
        Item {
            id: self.id,
            value: self.value,
        }
    }
}
