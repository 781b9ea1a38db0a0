//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect};

use crate::application::config::AuthConfig;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, CheckSessionUseCase, LoginInput, LoginUseCase,
    LogoutUseCase, ProfileUpdateInput, ProfileUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::{
    AuthSessionRepository, ProfileRepository, RoleRepository, UserRepository,
};
use crate::error::AuthResult;
use crate::presentation::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MeResponse, MessageResponse,
    ProfileResponse, RegisterRequest, RegisterResponse, UpdateProfileRequest,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
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
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
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
    let Json(req) = body?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            username: req.username,
            password: req.password,
            nickname: req.nickname,
            firstname: req.firstname,
            lastname: req.lastname,
            email: req.email,
            gender: req.gender,
            birthday: req.birthday,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: output.user_id,
            username: output.username,
        }),
    ))
}

// ============================================================================
// Login / Logout
// ============================================================================

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
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
    let Json(req) = body?;

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    let cookie = state.config.session_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            username: output.session.username,
            nickname: output.session.nickname,
            rolename: output.session.role_name,
            expires_at_ms: output.session.expires_at_ms,
        }),
    ))
}

/// POST /auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
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
    if let Some(token) = session_token(&headers, &state.config) {
        LogoutUseCase::new(state.repo.clone(), state.config.clone())
            .execute(&token)
            .await?;
    }

    let cookie = state.config.clear_session_cookie();

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")))
}

// ============================================================================
// Identity
// ============================================================================

/// GET /auth/me (behind the gate)
pub async fn me(user: CurrentUser) -> Json<MeResponse> {
    Json(MeResponse::from(user))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /auth/profile/{username}
pub async fn get_profile<R>(
    State(state): State<AuthAppState<R>>,
    username: Result<Path<String>, PathRejection>,
) -> AuthResult<Json<ProfileResponse>>
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
    let Path(username) = username?;

    let profile = ProfileUseCase::new(state.repo.clone(), state.repo.clone())
        .get(&username)
        .await?;

    Ok(Json(ProfileResponse::from(profile.fields)))
}

/// PUT /auth/profile/{username} and PUT /auth/profile/update/{username}
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    username: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> AuthResult<Json<ProfileResponse>>
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
    let Path(username) = username?;
    let Json(req) = body?;

    // The caller's own session picks up nickname/gender changes
    let caller = match session_token(&headers, &state.config) {
        Some(token) => {
            CheckSessionUseCase::new(state.repo.clone(), state.config.clone())
                .resolve(&token)
                .await?
        }
        None => None,
    };

    let fields = ProfileUseCase::new(state.repo.clone(), state.repo.clone())
        .update(
            &username,
            ProfileUpdateInput {
                nickname: req.nickname,
                firstname: req.firstname,
                lastname: req.lastname,
                email: req.email,
                gender: req.gender,
                birthday: req.birthday,
            },
            caller.as_ref(),
        )
        .await?;

    Ok(Json(ProfileResponse::from(fields)))
}

/// PUT /auth/change-password/{username}
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    username: Result<Path<String>, PathRejection>,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
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
    let Path(username) = username?;
    let Json(req) = body?;

    ChangePasswordUseCase::new(state.repo.clone())
        .execute(
            &username,
            ChangePasswordInput {
                old_password: req.old_password,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Change password successful",
    }))
}

fn session_token(headers: &HeaderMap, config: &AuthConfig) -> Option<String> {
    platform::cookie::extract_cookie(headers, config.session_cookie_name())
}
