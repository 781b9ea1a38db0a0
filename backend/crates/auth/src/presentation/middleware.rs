//! Auth Middleware
//!
//! The authentication gate. `require_session` rejects requests without a
//! live session; `check_session` only records who is asking.
//!
//! ```ignore
//! let gate = AuthMiddlewareState::new(repo, config, GateFailure::LOGIN_REDIRECT);
//! Router::new().route(
//!     "/about",
//!     get(about).route_layer(from_fn_with_state(gate, require_session::<PgAuthRepository>)),
//! );
//! ```

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, StatusCode, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use kernel::id::SessionId;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthError;

/// What the gate answers when there is no valid session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateFailure {
    /// `303 See Other` to the given path (page routes)
    Redirect(&'static str),
    /// `401` with `X-Auth-Required: true` (API routes)
    Unauthorized,
}

impl GateFailure {
    pub const LOGIN_REDIRECT: GateFailure = GateFailure::Redirect("/login");
}

impl IntoResponse for GateFailure {
    fn into_response(self) -> Response {
        match self {
            GateFailure::Redirect(location) => Redirect::to(location).into_response(),
            GateFailure::Unauthorized => {
                (StatusCode::UNAUTHORIZED, [("X-Auth-Required", "true")]).into_response()
            }
        }
    }
}

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub on_failure: GateFailure,
}

impl<R> AuthMiddlewareState<R>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, on_failure: GateFailure) -> Self {
        Self {
            repo,
            config,
            on_failure,
        }
    }
}

/// Identity of the logged-in caller, placed in request extensions by the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub nickname: String,
    pub role_id: i32,
    pub role_name: String,
    pub gender: String,
    pub session_id: SessionId,
}

impl From<AuthSession> for CurrentUser {
    fn from(session: AuthSession) -> Self {
        Self {
            id: session.user_id,
            username: session.username,
            nickname: session.nickname,
            role_id: session.role_id,
            role_name: session.role_name,
            gender: session.gender,
            session_id: session.session_id,
        }
    }
}

/// Requires the gate to have run; otherwise 401
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::SessionInvalid)
    }
}

/// Authentication status stored in request extensions by `check_session`
#[derive(Debug, Clone, Default)]
pub struct AuthStatus {
    pub user: Option<CurrentUser>,
}

/// Missing extension reads as anonymous
impl<S> FromRequestParts<S> for AuthStatus
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<AuthStatus>().cloned().unwrap_or_default())
    }
}

/// Middleware that requires a valid auth session
pub async fn require_session<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let Some(user) = resolve_current_user(&state, req.headers()).await else {
        return Err(state.on_failure.into_response());
    };

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Middleware that checks the auth session but doesn't require it
pub async fn check_session<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let user = resolve_current_user(&state, req.headers()).await;

    if let Some(user) = &user {
        req.extensions_mut().insert(user.clone());
    }
    req.extensions_mut().insert(AuthStatus { user });

    next.run(req).await
}

/// Session owner for the request's cookie, failing closed on store errors
async fn resolve_current_user<R>(
    state: &AuthMiddlewareState<R>,
    headers: &HeaderMap,
) -> Option<CurrentUser>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(headers, state.config.session_cookie_name())?;

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    match use_case.resolve(&token).await {
        Ok(session) => session.map(CurrentUser::from),
        Err(e) => {
            tracing::warn!(error = %e, "Session lookup failed, treating request as anonymous");
            None
        }
    }
}
