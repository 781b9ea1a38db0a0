//! Profile Entity
//!
//! One profile per user, keyed by username.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: i64,
    pub username: String,
    pub fields: ProfileFields,
}

/// Editable part of a profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub nickname: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub gender: String,
    pub birthday: Option<NaiveDate>,
}
