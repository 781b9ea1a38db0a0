//! Profile Use Case
//!
//! Read and update profiles. An update made by the profile's owner is
//! mirrored into the owner's session.

use std::sync::Arc;

use crate::domain::entity::{
    auth_session::AuthSession,
    profile::{Profile, ProfileFields},
};
use crate::domain::repository::{AuthSessionRepository, ProfileRepository};
use crate::domain::value_object::birthday::parse_birthday;
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

pub struct ProfileUpdateInput {
    pub nickname: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub gender: String,
    pub birthday: Option<String>,
}

pub struct ProfileUseCase<P, S>
where
    P: ProfileRepository,
    S: AuthSessionRepository,
{
    profile_repo: Arc<P>,
    session_repo: Arc<S>,
}

impl<P, S> ProfileUseCase<P, S>
where
    P: ProfileRepository + Sync,
    S: AuthSessionRepository + Sync,
{
    pub fn new(profile_repo: Arc<P>, session_repo: Arc<S>) -> Self {
        Self {
            profile_repo,
            session_repo,
        }
    }

    pub async fn get(&self, username: &str) -> AuthResult<Profile> {
        let username = Username::new(username).map_err(|_| AuthError::ProfileNotFound)?;
        self.profile_repo
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::ProfileNotFound)
    }

    /// Overwrite the profile of `username`
    ///
    /// `caller` is the session of the requester, if logged in.
    pub async fn update(
        &self,
        username: &str,
        input: ProfileUpdateInput,
        caller: Option<&AuthSession>,
    ) -> AuthResult<ProfileFields> {
        let username = Username::new(username).map_err(|_| AuthError::ProfileNotFound)?;
        let fields = ProfileFields {
            birthday: parse_birthday(input.birthday.as_deref())?,
            nickname: input.nickname,
            firstname: input.firstname,
            lastname: input.lastname,
            email: input.email,
            gender: input.gender,
        };

        if !self.profile_repo.update(&username, &fields).await? {
            return Err(AuthError::ProfileNotFound);
        }

        if let Some(session) = caller.filter(|s| s.username == username.as_str()) {
            self.session_repo
                .update_profile_fields(session.session_id, &fields.nickname, &fields.gender)
                .await?;
            tracing::debug!(session_id = %session.session_id, "Session profile fields synced");
        }

        tracing::info!(username = %username, "Profile updated");

        Ok(fields)
    }
}
