//! Entities

pub mod auth_session;
pub mod profile;
pub mod role;
pub mod user;
