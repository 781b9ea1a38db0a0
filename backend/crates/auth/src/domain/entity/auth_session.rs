//! Auth Session Entity
//!
//! Server-side login state. The client only holds a signed reference to
//! `session_id`; every identity field below is owned by the server.

use chrono::{DateTime, Duration, Utc};
use kernel::id::SessionId;

use crate::domain::entity::{profile::Profile, role::Role, user::User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub session_id: SessionId,
    pub user_id: i64,
    pub username: String,
    pub nickname: String,
    pub role_id: i32,
    pub role_name: String,
    pub gender: String,
    /// Expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    /// Snapshot identity fields at login time
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(
        user: &User,
        profile: &Profile,
        role: &Role,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id: SessionId::new(),
            user_id: user.id,
            username: user.username.as_str().to_string(),
            nickname: profile.fields.nickname.clone(),
            role_id: role.id,
            role_name: role.name.clone(),
            gender: profile.fields.gender.clone(),
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        }
    }

    /// Expired once `now_ms` reaches `expires_at_ms`
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }
}
