//! Check Session Use Case
//!
//! Turns a cookie token into the session it references, if any.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::SessionId;

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

pub struct CheckSessionUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Sync,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Active session for `token` at the current time
    pub async fn resolve(&self, token: &str) -> AuthResult<Option<AuthSession>> {
        self.resolve_at(token, Utc::now().timestamp_millis()).await
    }

    /// Active session for `token` at `now_ms`
    ///
    /// Bad signatures, unknown ids, expired rows and rows without a
    /// username all resolve to `None`. Only storage failures are errors.
    pub async fn resolve_at(&self, token: &str, now_ms: i64) -> AuthResult<Option<AuthSession>> {
        let Some(session_id) = self.parse_session_token(token) else {
            return Ok(None);
        };

        let session = self
            .session_repo
            .find_active(session_id, now_ms)
            .await?
            .filter(|s| !s.is_expired_at(now_ms) && !s.username.is_empty());

        Ok(session)
    }

    /// Verify the token signature and extract the session id
    pub fn parse_session_token(&self, token: &str) -> Option<SessionId> {
        let payload = platform::crypto::verify_token(&self.config.session_secret, token)?;
        payload.parse().ok()
    }
}
