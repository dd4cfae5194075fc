//! Session ID Value Object
//!
//! Opaque server-generated handle: 64 random bytes, URL-safe Base64.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Number of random bytes behind a session id
pub const SESSION_ID_BYTES: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random session id
    pub fn generate() -> AuthResult<Self> {
        platform::crypto::random_token(SESSION_ID_BYTES)
            .map(Self)
            .map_err(|e| AuthError::Internal(format!("Session id generation failed: {e}")))
    }

    /// Wrap a client-supplied id (e.g. the `X-Session-Token` header)
    ///
    /// Blank input is a validation error.
    pub fn from_client(raw: &str) -> AuthResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AuthError::Validation("Session token required".to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    #[inline]
    pub fn from_db<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique_and_long() {
        let a = SessionId::generate().unwrap();
        let b = SessionId::generate().unwrap();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 88);
    }

    #[test]
    fn test_from_client() {
        assert_eq!(SessionId::from_client(" abc ").unwrap().as_str(), "abc");
        assert!(matches!(
            SessionId::from_client("  "),
            Err(AuthError::Validation(_))
        ));
    }
}
