//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{
    AuthSessionRepository, ProfileRepository, RoleRepository, UserRepository,
};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, GateFailure, require_session};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository
        + ProfileRepository
        + RoleRepository
        + AuthSessionRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    let gate = AuthMiddlewareState::new(
        state.repo.clone(),
        state.config.clone(),
        GateFailure::Unauthorized,
    );

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route(
            "/me",
            get(handlers::me).route_layer(middleware::from_fn_with_state(
                gate,
                require_session::<R>,
            )),
        )
        .route(
            "/profile/{username}",
            get(handlers::get_profile::<R>).put(handlers::update_profile::<R>),
        )
        .route(
            "/profile/update/{username}",
            put(handlers::update_profile::<R>),
        )
        .route(
            "/change-password/{username}",
            put(handlers::change_password::<R>),
        )
        .with_state(state)
}
