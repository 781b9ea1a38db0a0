//! In-memory Repository
//!
//! Implements every auth repository trait over process memory. Used by the
//! router tests and for running without a database.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::SessionId;
use platform::password::HashedPassword;
use tokio::sync::RwLock;

use crate::application::config::DEFAULT_ROLE_ID;
use crate::domain::entity::{
    auth_session::AuthSession,
    profile::{Profile, ProfileFields},
    role::Role,
    user::{NewUser, User},
};
use crate::domain::repository::{
    AuthSessionRepository, ProfileRepository, RoleRepository, UserRepository,
};
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

#[derive(Clone)]
pub struct InMemoryAuthRepository {
    inner: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    next_user_id: i64,
    users: HashMap<String, User>,
    profiles: HashMap<String, Profile>,
    roles: HashMap<i32, Role>,
    sessions: HashMap<SessionId, AuthSession>,
}

impl Default for InMemoryAuthRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuthRepository {
    /// Repository seeded with the default `member` role
    pub fn new() -> Self {
        let mut tables = Tables::default();
        tables.roles.insert(
            DEFAULT_ROLE_ID,
            Role {
                id: DEFAULT_ROLE_ID,
                name: "member".to_string(),
                description: "Registered member".to_string(),
            },
        );
        Self::from_tables(tables)
    }

    /// Repository with an empty role table
    pub fn without_roles() -> Self {
        Self::from_tables(Tables::default())
    }

    fn from_tables(tables: Tables) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tables)),
        }
    }

    /// Drop a profile row, leaving the user in place
    pub async fn remove_profile(&self, username: &str) -> bool {
        self.inner.write().await.profiles.remove(username).is_some()
    }

    /// Number of stored session rows, expired ones included
    pub async fn session_count(&self) -> usize {
        self.inner.read().await.sessions.len()
    }

    /// Store a session row as-is
    pub async fn insert_session(&self, session: AuthSession) {
        self.inner
            .write()
            .await
            .sessions
            .insert(session.session_id, session);
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create_with_profile(
        &self,
        user: &NewUser,
        profile: &ProfileFields,
    ) -> AuthResult<i64> {
        let mut tables = self.inner.write().await;
        let key = user.username.as_str().to_string();

        if tables.users.contains_key(&key) || tables.profiles.contains_key(&key) {
            return Err(AuthError::UserNameTaken);
        }

        tables.next_user_id += 1;
        let id = tables.next_user_id;

        tables.users.insert(
            key.clone(),
            User {
                id,
                username: user.username.clone(),
                password_hash: user.password_hash.clone(),
                role_id: user.role_id,
            },
        );
        tables.profiles.insert(
            key.clone(),
            Profile {
                user_id: id,
                username: key,
                fields: profile.clone(),
            },
        );

        Ok(id)
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>> {
        Ok(self.inner.read().await.users.get(username.as_str()).cloned())
    }

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        Ok(self.inner.read().await.users.contains_key(username.as_str()))
    }

    async fn update_password(
        &self,
        username: &Username,
        password_hash: &HashedPassword,
    ) -> AuthResult<bool> {
        let mut tables = self.inner.write().await;
        Ok(match tables.users.get_mut(username.as_str()) {
            Some(user) => {
                user.password_hash = password_hash.clone();
                true
            }
            None => false,
        })
    }
}

impl ProfileRepository for InMemoryAuthRepository {
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Profile>> {
        Ok(self.inner.read().await.profiles.get(username.as_str()).cloned())
    }

    async fn update(&self, username: &Username, fields: &ProfileFields) -> AuthResult<bool> {
        let mut tables = self.inner.write().await;
        Ok(match tables.profiles.get_mut(username.as_str()) {
            Some(profile) => {
                profile.fields = fields.clone();
                true
            }
            None => false,
        })
    }
}

impl RoleRepository for InMemoryAuthRepository {
    async fn find_by_id(&self, role_id: i32) -> AuthResult<Option<Role>> {
        Ok(self.inner.read().await.roles.get(&role_id).cloned())
    }
}

impl AuthSessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        self.insert_session(session.clone()).await;
        Ok(())
    }

    async fn find_active(
        &self,
        session_id: SessionId,
        now_ms: i64,
    ) -> AuthResult<Option<AuthSession>> {
        Ok(self
            .inner
            .read()
            .await
            .sessions
            .get(&session_id)
            .filter(|s| s.expires_at_ms > now_ms)
            .cloned())
    }

    async fn update_profile_fields(
        &self,
        session_id: SessionId,
        nickname: &str,
        gender: &str,
    ) -> AuthResult<()> {
        if let Some(session) = self.inner.write().await.sessions.get_mut(&session_id) {
            session.nickname = nickname.to_string();
            session.gender = gender.to_string();
        }
        Ok(())
    }

    async fn expire(&self, session_id: SessionId, now_ms: i64) -> AuthResult<()> {
        if let Some(session) = self.inner.write().await.sessions.get_mut(&session_id) {
            session.expires_at_ms = session.expires_at_ms.min(now_ms);
        }
        Ok(())
    }

    async fn cleanup_expired(&self, now_ms: i64) -> AuthResult<u64> {
        let mut tables = self.inner.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| s.expires_at_ms > now_ms);
        Ok((before - tables.sessions.len()) as u64)
    }
}
