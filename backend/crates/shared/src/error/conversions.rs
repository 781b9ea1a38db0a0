//! Error conversions
//!
//! Database error classification and the HTTP rendering of [`AppError`].

#[cfg(feature = "axum")]
use super::app_error::AppError;

/// PostgreSQL unique violation
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// True when the error is a PostgreSQL unique-constraint violation
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code == PG_UNIQUE_VIOLATION),
        _ => false,
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "sqlx")]
    #[test]
    fn test_only_database_errors_can_be_unique_violations() {
        assert!(!super::is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!super::is_unique_violation(&sqlx::Error::PoolTimedOut));
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_problem_status_follows_kind() {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let response = super::AppError::conflict("Username already taken").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
