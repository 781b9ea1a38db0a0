//! Settings Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use thiserror::Error;

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading the config table failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value could not be parsed into the requested type
    #[error("Invalid value for config key '{key}': {value}")]
    InvalidValue { key: String, value: String },
}

impl SettingsError {
    fn log(&self) {
        match self {
            SettingsError::Database(e) => {
                tracing::error!(error = %e, "Settings database error");
            }
            SettingsError::InvalidValue { key, .. } => {
                tracing::error!(key = %key, "Settings value has the wrong type");
            }
        }
    }
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        err.log();
        AppError::internal("Configuration unavailable")
    }
}

impl IntoResponse for SettingsError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
