//! Value Objects

pub mod birthday;
pub mod username;
