//! Platform Crate - Technical Infrastructure
//!
//! Shared technical building blocks with no domain knowledge:
//! - Password hashing (Argon2id with fixed parameters)
//! - Signed opaque tokens (HMAC-SHA256, Base64)
//! - Cookie parsing and `Set-Cookie` construction

pub mod cookie;
pub mod crypto;
pub mod password;
