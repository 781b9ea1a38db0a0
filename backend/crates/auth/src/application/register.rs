//! Register Use Case
//!
//! Creates a user and its profile.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::{profile::ProfileFields, user::NewUser};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{birthday::parse_birthday, username::Username};
use crate::error::{AuthError, AuthResult};

pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub nickname: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub gender: String,
    pub birthday: Option<String>,
}

pub struct RegisterOutput {
    pub user_id: i64,
    pub username: String,
}

pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository + Sync,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let username = Username::new(&input.username)?;
        let password = ClearTextPassword::new(input.password)?;
        let birthday = parse_birthday(input.birthday.as_deref())?;

        if self.user_repo.exists_by_username(&username).await? {
            return Err(AuthError::UserNameTaken);
        }

        let user = NewUser {
            username,
            password_hash: password.hash()?,
            role_id: self.config.default_role_id,
        };

        let profile = ProfileFields {
            nickname: input.nickname,
            firstname: input.firstname,
            lastname: input.lastname,
            email: input.email,
            gender: input.gender,
            birthday,
        };

        // A concurrent duplicate still surfaces as UserNameTaken from storage
        let user_id = self.user_repo.create_with_profile(&user, &profile).await?;

        tracing::info!(
            user_id,
            username = %user.username,
            role_id = user.role_id,
            "User registered"
        );

        Ok(RegisterOutput {
            user_id,
            username: user.username.to_string(),
        })
    }
}
