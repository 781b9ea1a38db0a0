//! Items Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - `Item` entity and repository trait
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers and router
//!
//! Items are independent of authentication; the API is public.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{ItemError, ItemResult};
pub use infra::{memory::InMemoryItemRepository, postgres::PgItemRepository};
pub use presentation::router::{items_router, items_router_generic};

#[cfg(test)]
mod tests;
