//! User Name Value Object
//!
//! The user name is the login handle. Input is sanitised rather than
//! rejected: characters from a fixed markup/punctuation denylist are
//! stripped and nothing else is rewritten. A user name that is blank
//! after sanitising, or overlong, is an error; whitespace is kept, so
//! `" bob"` and `"bob"` are different accounts.
//!
//! The same sanitiser is applied to first and last names ([`PersonName`]).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for user name (in characters, after sanitising)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// Maximum length for first / last name (in characters, after sanitising)
pub const PERSON_NAME_MAX_LENGTH: usize = 100;

/// Characters removed from free-text identity fields
pub const SANITIZE_DENYLIST: &[char] = &[
    '<', '>', '&', '"', '\'', '/', '\\', '(', ')', '{', '}', '[', ']',
];

/// Strip denylisted characters
///
/// ```rust
/// use auth::domain::value_object::user_name::sanitize_input;
/// assert_eq!(sanitize_input("<b>alice</b>"), "baliceb");
/// assert_eq!(sanitize_input(" alice "), " alice ");
/// ```
pub fn sanitize_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| !SANITIZE_DENYLIST.contains(c))
        .collect()
}

// ============================================================================
// UserName
// ============================================================================

/// Sanitised, non-empty user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Sanitise and validate user input
    pub fn new(raw: &str) -> AuthResult<Self> {
        let name = sanitize_input(raw);

        if name.trim().is_empty() {
            return Err(AuthError::Validation("Username cannot be empty".to_string()));
        }
        if name.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Username must be at most {USER_NAME_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// PersonName
// ============================================================================

/// Sanitised first or last name
///
/// Empty is allowed: registration requires the field to be present, not
/// non-empty after sanitising.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(raw: &str) -> AuthResult<Self> {
        let name = sanitize_input(raw);
        if name.chars().count() > PERSON_NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Name must be at most {PERSON_NAME_MAX_LENGTH} characters"
            )));
        }
        Ok(Self(name))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
