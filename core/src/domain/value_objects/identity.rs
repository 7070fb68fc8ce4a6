//! Identity value object for login-code authentication.
//!
//! An identity is an email address in this domain. All store operations key
//! on the normalized form, so `" Foo@Bar.com "` and `"foo@bar.com"` refer to
//! the same pending code.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized, case-insensitive identity (email address).
///
/// Construction normalizes the raw input by trimming surrounding whitespace
/// and lowercasing, so two `Identity` values compare equal whenever they
/// refer to the same account. The core does not validate email syntax;
/// that belongs to the HTTP layer and the identity authorizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Creates a normalized identity from raw caller input.
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// Returns the normalized identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masks the identity for logging (security requirement).
    ///
    /// Keeps at most the first two characters of the local part and the
    /// full domain, e.g. `jo***@example.com`.
    pub fn masked(&self) -> String {
        match self.0.split_once('@') {
            Some((local, domain)) => {
                let kept: String = local.chars().take(2).collect();
                format!("{}***@{}", kept, domain)
            }
            None => "***".to_string(),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Identity {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
