//! Username Value Object
//!
//! The login handle. Matching is exact (case-sensitive) after NFKC
//! normalization and trimming.
//!
//! ## Invariants
//! - Non-empty after trimming
//! - At most `USERNAME_MAX_LENGTH` characters
//! - No whitespace or control characters

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const USERNAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("username is required")]
    Empty,

    #[error("username must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("username must not contain whitespace or control characters")]
    InvalidCharacter,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(raw: &str) -> Result<Self, UsernameError> {
        let normalized: String = raw.nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: USERNAME_MAX_LENGTH,
                actual: length,
            });
        }

        if trimmed
            .chars()
            .any(|ch| ch.is_whitespace() || ch.is_control())
        {
            return Err(UsernameError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Wrap a value read back from storage
    pub(crate) fn from_trusted(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_normalizes() {
        assert_eq!(Username::new("  alice ").unwrap().as_str(), "alice");
        // Fullwidth letters fold to ASCII
        assert_eq!(Username::new("ａｌｉｃｅ").unwrap().as_str(), "alice");
    }

    #[test]
    fn case_is_preserved() {
        assert_ne!(Username::new("Alice").unwrap(), Username::new("alice").unwrap());
    }

    #[test]
    fn rejects_empty_and_inner_whitespace() {
        assert_eq!(Username::new("   "), Err(UsernameError::Empty));
        assert_eq!(Username::new("al ice"), Err(UsernameError::InvalidCharacter));
    }

    #[test]
    fn rejects_too_long() {
        let long = "a".repeat(USERNAME_MAX_LENGTH + 1);
        assert!(matches!(
            Username::new(&long),
            Err(UsernameError::TooLong { .. })
        ));
    }
}
