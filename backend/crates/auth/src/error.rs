//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

use crate::domain::value_object::{birthday::BirthdayError, username::UsernameError};

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration without username or password
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid birthday format. Use YYYY-MM-DD")]
    InvalidBirthday(#[from] BirthdayError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("User already exists")]
    UserNameTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Profile not found")]
    ProfileNotFound,

    /// Unknown user or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Login found the user but not its profile or role row
    #[error("{0} not found")]
    IncompleteAccount(&'static str),

    #[error("Not logged in")]
    SessionInvalid,

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials
            | AuthError::InvalidUsername(_)
            | AuthError::InvalidPassword(_)
            | AuthError::InvalidBirthday(_)
            | AuthError::InvalidBody(_)
            | AuthError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            AuthError::UserNameTaken => StatusCode::CONFLICT,
            AuthError::UserNotFound | AuthError::ProfileNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidCredentials
            | AuthError::IncompleteAccount(_)
            | AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::PasswordHash(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self.status_code() {
            StatusCode::BAD_REQUEST => ErrorKind::BadRequest,
            StatusCode::CONFLICT => ErrorKind::Conflict,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized,
            _ => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic message; the detail is logged.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        if kind.is_server_error() {
            AppError::new(kind, "Internal server error")
        } else {
            AppError::new(kind, self.to_string())
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials | AuthError::IncompleteAccount(_) => {
                tracing::warn!(error = %self, "Login rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for AuthError {
    fn from(rejection: PathRejection) -> Self {
        AuthError::InvalidPath(rejection.body_text())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_failures_are_unauthorized() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::IncompleteAccount("Role").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::IncompleteAccount("Profile").to_string(),
            "Profile not found"
        );
    }

    #[test]
    fn lookup_and_conflict_codes() {
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::UserNameTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::UserNameTaken.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn server_errors_hide_detail() {
        let err = AuthError::Internal("secret detail".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_app_error().message(), "Internal server error");
    }
}
