//! User Entity

use platform::password::HashedPassword;

use crate::domain::value_object::username::Username;

/// Stored account
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: Username,
    pub password_hash: HashedPassword,
    pub role_id: i32,
}

/// Account about to be inserted (id is assigned by storage)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: HashedPassword,
    pub role_id: i32,
}
