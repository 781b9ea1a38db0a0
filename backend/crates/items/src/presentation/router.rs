//! Items Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::domain::repository::ItemRepository;
use crate::infra::postgres::PgItemRepository;
use crate::presentation::handlers::{self, ItemsAppState};

/// Create the items router with PostgreSQL repository
pub fn items_router(repo: PgItemRepository) -> Router {
    items_router_generic(repo)
}

/// Create an items router for any repository implementation
pub fn items_router_generic<R>(repo: R) -> Router
where
    R: ItemRepository + Clone + Send + Sync + 'static,
{
    let state = ItemsAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", get(handlers::list_items::<R>))
        .route("/add", post(handlers::add_item::<R>))
        .route("/update/{id}", put(handlers::update_item::<R>))
        .route("/delete/{id}", delete(handlers::delete_item::<R>))
        .with_state(state)
}
