//! Email value object.
//!
//! Wraps an address that passed syntactic validation, so repositories
//! never see unchecked input.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::{DomainError, DomainResult};

/// A syntactically valid email address, stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parse and validate an email address.
    ///
    /// # Errors
    /// Returns a validation error for empty or malformed input. Surrounding
    /// whitespace is malformed, not stripped.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if raw.is_empty() {
            return Err(DomainError::validation("Email is required"));
        }
        if raw.trim() != raw || !raw.validate_email() {
            return Err(DomainError::validation("Invalid email format"));
        }
        Ok(Self(raw.to_string()))
    }

    /// Check whether the input would parse.
    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
