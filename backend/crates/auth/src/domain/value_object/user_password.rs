//! User Password Value Object
//!
//! Domain wrappers over `platform::password`:
//! - [`RawPassword`]: user input, zeroized on drop
//! - [`UserPassword`]: stored `base64(salt ‖ key)` hash
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//! use platform::password::HashParams;
//!
//! let params = HashParams {
//!     memory_kib: 1024,
//!     iterations: 1,
//!     parallelism: 1,
//!     ..HashParams::DEFAULT
//! };
//! let raw = RawPassword::new("MySecurePass123!".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, &params).unwrap();
//! assert!(hashed.verify(&raw, &params).unwrap());
//! ```

use platform::password::{ClearTextPassword, HashParams, HashedPassword};
use std::fmt;

use crate::error::AuthResult;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new password that must satisfy the strength policy
    ///
    /// Used whenever a password is being set (registration, change).
    /// Policy violations become `AuthError::Validation`.
    pub fn new(raw: String) -> AuthResult<Self> {
        Ok(Self(ClearTextPassword::new(raw)?))
    }

    /// Wrap a submitted password for verification only
    pub fn submitted(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password with a fresh salt
    pub fn from_raw(raw: &RawPassword, params: &HashParams) -> AuthResult<Self> {
        Ok(Self(raw.inner().hash(params)?))
    }

    /// Wrap a hash loaded from the database
    pub fn from_db(hash: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(hash))
    }

    /// Get the encoded hash for database storage
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Verify a raw password against this hash in constant time
    ///
    /// A malformed stored hash is an internal error, not a mismatch.
    pub fn verify(&self, raw: &RawPassword, params: &HashParams) -> AuthResult<bool> {
        Ok(self.0.verify(raw.inner(), params)?)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
