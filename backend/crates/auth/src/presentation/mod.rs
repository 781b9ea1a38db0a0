//! Presentation Layer
//!
//! HTTP handlers, DTOs, the authentication gate and the router.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use middleware::{
    AuthMiddlewareState, AuthStatus, CurrentUser, GateFailure, check_session, require_session,
};
pub use router::{auth_router, auth_router_generic};
