//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::profile::ProfileFields;
use crate::domain::value_object::birthday::format_birthday;
use crate::presentation::middleware::CurrentUser;

/// Request for POST /auth/register
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub gender: String,
    /// `YYYY-MM-DD`; empty or absent means unknown
    #[serde(default)]
    pub birthday: Option<String>,
}

/// Response for POST /auth/register
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub username: String,
}

/// Request for POST /auth/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response for POST /auth/login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub nickname: String,
    pub rolename: String,
    pub expires_at_ms: i64,
}

/// Response for GET /auth/me (all values are strings)
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub username: String,
    pub nickname: String,
    pub roleid: String,
    pub rolename: String,
    pub gender: String,
}

impl From<CurrentUser> for MeResponse {
    fn from(user: CurrentUser) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            nickname: user.nickname,
            roleid: user.role_id.to_string(),
            rolename: user.role_name,
            gender: user.gender,
        }
    }
}

/// Response for GET /auth/profile/{username}
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub nickname: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub gender: String,
    /// `YYYY-MM-DD`, or empty when unknown
    pub birthday: String,
}

impl From<ProfileFields> for ProfileResponse {
    fn from(fields: ProfileFields) -> Self {
        Self {
            birthday: format_birthday(fields.birthday),
            nickname: fields.nickname,
            firstname: fields.firstname,
            lastname: fields.lastname,
            email: fields.email,
            gender: fields.gender,
        }
    }
}

/// Request for PUT /auth/profile/{username}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub nickname: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub gender: String,
    pub birthday: Option<String>,
}

/// Request for PUT /auth/change-password/{username}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
