//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::SessionId;
use platform::password::HashedPassword;

use crate::domain::entity::{
    auth_session::AuthSession,
    profile::{Profile, ProfileFields},
    role::Role,
    user::{NewUser, User},
};
use crate::domain::value_object::username::Username;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert the user and its profile atomically, returning the user id
    ///
    /// Fails with `AuthError::UserNameTaken` on a duplicate username.
    async fn create_with_profile(&self, user: &NewUser, profile: &ProfileFields)
    -> AuthResult<i64>;

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>>;

    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool>;

    /// Replace the stored hash; `false` when no such user
    async fn update_password(
        &self,
        username: &Username,
        password_hash: &HashedPassword,
    ) -> AuthResult<bool>;
}

/// Profile repository trait
#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Profile>>;

    /// Overwrite editable fields; `false` when no such profile
    async fn update(&self, username: &Username, fields: &ProfileFields) -> AuthResult<bool>;
}

/// Role repository trait
#[trait_variant::make(RoleRepository: Send)]
pub trait LocalRoleRepository {
    async fn find_by_id(&self, role_id: i32) -> AuthResult<Option<Role>>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Session that is still valid at `now_ms`
    async fn find_active(&self, session_id: SessionId, now_ms: i64)
    -> AuthResult<Option<AuthSession>>;

    /// Keep the session's copy of profile fields in sync
    async fn update_profile_fields(
        &self,
        session_id: SessionId,
        nickname: &str,
        gender: &str,
    ) -> AuthResult<()>;

    /// Force expiry to `now_ms`
    async fn expire(&self, session_id: SessionId, now_ms: i64) -> AuthResult<()>;

    /// Delete every session expired at `now_ms`
    async fn cleanup_expired(&self, now_ms: i64) -> AuthResult<u64>;
}
