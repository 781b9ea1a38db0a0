//! Login Use Case
//!
//! Verifies credentials and opens a server-side session.

use std::sync::Arc;

use chrono::Utc;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{
    AuthSessionRepository, ProfileRepository, RoleRepository, UserRepository,
};
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

pub struct LoginOutput {
    /// Signed cookie value
    pub session_token: String,
    pub session: AuthSession,
}

pub struct LoginUseCase<U, P, Ro, S>
where
    U: UserRepository,
    P: ProfileRepository,
    Ro: RoleRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    profile_repo: Arc<P>,
    role_repo: Arc<Ro>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, P, Ro, S> LoginUseCase<U, P, Ro, S>
where
    U: UserRepository + Sync,
    P: ProfileRepository + Sync,
    Ro: RoleRepository + Sync,
    S: AuthSessionRepository + Sync,
{
    pub fn new(
        user_repo: Arc<U>,
        profile_repo: Arc<P>,
        role_repo: Arc<Ro>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            profile_repo,
            role_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Malformed input is indistinguishable from an unknown user
        let username =
            Username::new(&input.username).map_err(|_| AuthError::InvalidCredentials)?;
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&password) {
            return Err(AuthError::InvalidCredentials);
        }

        let profile = self
            .profile_repo
            .find_by_username(&user.username)
            .await?
            .ok_or(AuthError::IncompleteAccount("Profile"))?;

        let role = self
            .role_repo
            .find_by_id(user.role_id)
            .await?
            .ok_or(AuthError::IncompleteAccount("Role"))?;

        let session = AuthSession::new(
            &user,
            &profile,
            &role,
            self.config.session_ttl_chrono(),
            Utc::now(),
        );
        self.session_repo.create(&session).await?;

        let session_token = platform::crypto::sign_token(
            &self.config.session_secret,
            &session.session_id.to_string(),
        );

        tracing::info!(
            user_id = user.id,
            role = %role.name,
            "User logged in"
        );

        Ok(LoginOutput {
            session_token,
            session,
        })
    }
}
