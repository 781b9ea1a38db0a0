//! Logout Use Case

use std::sync::Arc;

use chrono::Utc;

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

pub struct LogoutUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> LogoutUseCase<S>
where
    S: AuthSessionRepository + Sync,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Revoke the session behind `token`; unknown or forged tokens are a no-op
    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        let check = CheckSessionUseCase::new(self.session_repo.clone(), self.config.clone());

        if let Some(session_id) = check.parse_session_token(token) {
            self.session_repo
                .expire(session_id, Utc::now().timestamp_millis())
                .await?;
            tracing::info!(session_id = %session_id, "Session revoked");
        }

        Ok(())
    }
}
