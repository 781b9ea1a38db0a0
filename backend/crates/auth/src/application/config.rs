//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

pub use platform::cookie::{CookieConfig, SameSite};

/// Role given to new accounts when the config table does not say otherwise
pub const DEFAULT_ROLE_ID: i32 = 87;

/// Fixed session lifetime (1 hour)
pub const SESSION_TTL: Duration = Duration::from_secs(3600);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie attributes (name `session`, HttpOnly, Path=/)
    pub cookie: CookieConfig,
    /// Key for HMAC signing of session tokens
    pub session_secret: Vec<u8>,
    pub session_ttl: Duration,
    /// Role assigned at registration
    pub default_role_id: i32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie: CookieConfig {
                max_age_secs: Some(SESSION_TTL.as_secs() as i64),
                ..CookieConfig::default()
            },
            session_secret: platform::crypto::random_bytes(32),
            session_ttl: SESSION_TTL,
            default_role_id: DEFAULT_ROLE_ID,
        }
    }
}

impl AuthConfig {
    /// Config signing sessions with `secret`
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            session_secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie.secure = secure;
        self
    }

    pub fn with_default_role_id(mut self, role_id: i32) -> Self {
        self.default_role_id = role_id;
        self
    }

    pub fn session_cookie_name(&self) -> &str {
        &self.cookie.name
    }

    /// Session TTL as a chrono duration
    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.session_ttl.as_millis() as i64)
    }

    /// `Set-Cookie` value carrying a session token
    pub fn session_cookie(&self, token: &str) -> String {
        self.cookie.build_set_cookie(token)
    }

    /// `Set-Cookie` value that drops the session cookie
    pub fn clear_session_cookie(&self) -> String {
        self.cookie.build_expired_cookie()
    }
}
