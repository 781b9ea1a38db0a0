//! Shared Kernel
//!
//! Vocabulary that every backend crate agrees on:
//! - The unified HTTP-facing error type and its classification
//! - Typed identifiers for entities keyed by UUID
//!
//! Anything domain specific (items, users, sessions) lives in its own crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
