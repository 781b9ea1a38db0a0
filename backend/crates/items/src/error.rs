//! Item Error Types

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type ItemResult<T> = Result<T, ItemError>;

#[derive(Debug, Error)]
pub enum ItemError {
    /// No row with this id
    #[error("Item {0} not found")]
    NotFound(i64),

    /// Value missing or blank
    #[error("Item value must not be empty")]
    EmptyValue,

    /// Body could not be decoded
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Path id is not an integer
    #[error("Invalid item id: {0}")]
    InvalidId(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ItemError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ItemError::NotFound(_) => StatusCode::NOT_FOUND,
            ItemError::EmptyValue | ItemError::InvalidBody(_) | ItemError::InvalidId(_) => {
                StatusCode::BAD_REQUEST
            }
            ItemError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ItemError::NotFound(_) => ErrorKind::NotFound,
            ItemError::EmptyValue | ItemError::InvalidBody(_) | ItemError::InvalidId(_) => {
                ErrorKind::BadRequest
            }
            ItemError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    fn log(&self) {
        match self {
            ItemError::Database(e) => {
                tracing::error!(error = %e, "Items database error");
            }
            _ => {
                tracing::debug!(error = %self, "Items request rejected");
            }
        }
    }

    fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        // Driver details stay in the logs
        if kind.is_server_error() {
            AppError::new(kind, "Database error")
        } else {
            AppError::new(kind, self.to_string())
        }
    }
}

impl From<JsonRejection> for ItemError {
    fn from(rejection: JsonRejection) -> Self {
        ItemError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ItemError {
    fn from(rejection: PathRejection) -> Self {
        ItemError::InvalidId(rejection.body_text())
    }
}

impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ItemError::NotFound(1).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ItemError::EmptyValue.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ItemError::InvalidId("abc".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ItemError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_detail_is_hidden() {
        let app: AppError = ItemError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(app.message(), "Database error");
    }
}
