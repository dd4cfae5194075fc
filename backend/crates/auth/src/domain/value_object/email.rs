//! Email Value Object
//!
//! Trimmed and lower-cased. The format check is deliberately loose:
//! one `@` with something on both sides. Deliverability is not checked.

use std::fmt;

use crate::error::{AuthError, AuthResult};

const EMAIL_MIN_LENGTH: usize = 5;
/// RFC 5321 path limit
const EMAIL_MAX_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> AuthResult<Self> {
        let email = email.into().trim().to_lowercase();

        if !(EMAIL_MIN_LENGTH..=EMAIL_MAX_LENGTH).contains(&email.len()) || !has_valid_shape(&email)
        {
            return Err(AuthError::Validation("Invalid email format".to_string()));
        }

        Ok(Self(email))
    }

    /// Trusted value read back from the store
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn has_valid_shape(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
