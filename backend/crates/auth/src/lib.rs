//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, the gate middleware, router
//!
//! ## Features
//! - Registration (user + profile written in one transaction)
//! - Username/password login with server-side sessions
//! - Profile read/update and password change
//! - Authentication gate usable on any route, page or API
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - The session cookie holds only an HMAC-signed session id; identity
//!   fields live in the `auth_sessions` table
//! - Sessions expire after a fixed TTL; logout forces expiry

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::session_sweeper::{SESSION_SWEEP_INTERVAL, SessionSweeper};
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::middleware::{
    AuthMiddlewareState, AuthStatus, CurrentUser, GateFailure, check_session, require_session,
};
pub use presentation::router::{auth_router, auth_router_generic};
