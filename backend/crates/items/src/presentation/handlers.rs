//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::manage_items::ManageItemsUseCase;
use crate::domain::repository::ItemRepository;
use crate::error::ItemResult;
use crate::presentation::dto::{ItemRequest, ItemResponse};

/// Shared state for item handlers
#[derive(Clone)]
pub struct ItemsAppState<R>
where
    R: ItemRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// GET /api/items
pub async fn list_items<R>(
    State(state): State<ItemsAppState<R>>,
) -> ItemResult<Json<Vec<ItemResponse>>>
where
    R: ItemRepository + Clone + Send + Sync + 'static,
{
    let items = ManageItemsUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// POST /api/items/add
pub async fn add_item<R>(
    State(state): State<ItemsAppState<R>>,
    body: Result<Json<ItemRequest>, JsonRejection>,
) -> ItemResult<impl IntoResponse>
where
    R: ItemRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body?;

    let item = ManageItemsUseCase::new(state.repo.clone())
        .create(req.value)
        .await?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// PUT /api/items/update/{id}
pub async fn update_item<R>(
    State(state): State<ItemsAppState<R>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ItemRequest>, JsonRejection>,
) -> ItemResult<Json<ItemResponse>>
where
    R: ItemRepository + Clone + Send + Sync + 'static,
{
    let Path(id) = id?;
    let Json(req) = body?;

    let item = ManageItemsUseCase::new(state.repo.clone())
        .update(id, req.value)
        .await?;

    Ok(Json(ItemResponse::from(item)))
}

/// DELETE /api/items/delete/{id}
pub async fn delete_item<R>(
    State(state): State<ItemsAppState<R>>,
    id: Result<Path<i64>, PathRejection>,
) -> ItemResult<StatusCode>
where
    R: ItemRepository + Clone + Send + Sync + 'static,
{
    let Path(id) = id?;

    ManageItemsUseCase::new(state.repo.clone())
        .delete(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
