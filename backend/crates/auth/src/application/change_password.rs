//! Change Password Use Case

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserRepository + Sync,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, username: &str, input: ChangePasswordInput) -> AuthResult<()> {
        let new_password = ClearTextPassword::new(input.new_password)?;

        let username = Username::new(username).map_err(|_| AuthError::UserNotFound)?;
        let user = self
            .user_repo
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let old_password =
            ClearTextPassword::new(input.old_password).map_err(|_| AuthError::InvalidCredentials)?;
        if !user.password_hash.verify(&old_password) {
            return Err(AuthError::InvalidCredentials);
        }

        let new_hash = new_password.hash()?;
        if !self.user_repo.update_password(&username, &new_hash).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = user.id, "Password changed");

        Ok(())
    }
}
