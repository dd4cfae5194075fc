//! Password Hashing and Verification
//!
//! Argon2id credential hashing with:
//! - A random per-password salt
//! - Fixed, configurable cost parameters ([`HashParams`])
//! - Zeroization of clear text and derived key material
//! - Constant-time comparison of derived keys
//!
//! ## Storage format
//! A stored hash is `base64(salt ‖ derived_key)` using the standard
//! alphabet. The cost parameters are not embedded, so every verifier must
//! be configured with the same [`HashParams`] that produced the hash.

use std::fmt;

use argon2::{Algorithm, Argon2, Params, Version};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::{constant_time_eq, from_base64, random_bytes, to_base64};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Characters that satisfy the "special character" rule
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()-_+={}[]|\\;:\"'<>,.?/";

// ============================================================================
// Hash parameters
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
    /// Salt length in bytes
    pub salt_len: usize,
    /// Derived key length in bytes
    pub key_len: usize,
}

impl HashParams {
    /// 64 MiB, 3 passes, 2 lanes, 16-byte salt, 32-byte key
    pub const DEFAULT: Self = Self {
        memory_kib: 64 * 1024,
        iterations: 3,
        parallelism: 2,
        salt_len: 16,
        key_len: 32,
    };

    fn hasher(&self) -> Result<Argon2<'static>, PasswordHashError> {
        let params = Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(self.key_len),
        )
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    fn derive(
        &self,
        password: &[u8],
        salt: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, PasswordHashError> {
        let mut key = Zeroizing::new(vec![0u8; self.key_len]);
        self.hasher()?
            .hash_password_into(password, salt, &mut key)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
        Ok(key)
    }
}

impl Default for HashParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters long")]
    TooShort { min: usize },

    #[error("Password must be at most {max} characters long")]
    TooLong { max: usize },

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,

    #[error("Password must contain at least one special character")]
    MissingSpecial,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Entropy source failure while generating the salt
    #[error("Salt generation failed: {0}")]
    SaltGenerationFailed(String),

    /// Argon2 rejected the parameters or inputs
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash is not valid base64 or is shorter than the salt
    #[error("Malformed password hash")]
    MalformedHash,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`, and its `Debug` output is redacted.
///
/// ```rust
/// use platform::password::{ClearTextPassword, HashParams};
///
/// let params = HashParams {
///     memory_kib: 1024,
///     iterations: 1,
///     parallelism: 1,
///     ..HashParams::DEFAULT
/// };
/// let password = ClearTextPassword::new("Str0ng!Pw".to_string()).unwrap();
/// let hashed = password.hash(&params).unwrap();
/// assert!(hashed.verify(&password, &params).unwrap());
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new password, enforcing the strength policy
    ///
    /// Requires 8..=128 characters with at least one uppercase letter,
    /// one lowercase letter, one digit and one character from
    /// [`SPECIAL_CHARACTERS`].
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self(raw);
        password.check_policy()?;
        Ok(password)
    }

    /// Wrap a password for verification only (no policy check)
    ///
    /// Login must accept whatever the user typed; the policy only applies
    /// when a password is being set.
    pub fn for_verification(raw: String) -> Self {
        Self(raw)
    }

    fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        let s = self.0.as_str();
        let char_count = s.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
            });
        }
        if !s.chars().any(|c| c.is_uppercase()) {
            return Err(PasswordPolicyError::MissingUppercase);
        }
        if !s.chars().any(|c| c.is_lowercase()) {
            return Err(PasswordPolicyError::MissingLowercase);
        }
        if !s.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }
        if !s.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
            return Err(PasswordPolicyError::MissingSpecial);
        }
        Ok(())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash with a fresh random salt
    ///
    /// Fails only if the entropy source fails or `params` are rejected by
    /// Argon2.
    pub fn hash(&self, params: &HashParams) -> Result<HashedPassword, PasswordHashError> {
        let salt = random_bytes(params.salt_len)
            .map_err(|e| PasswordHashError::SaltGenerationFailed(e.to_string()))?;
        let key = params.derive(self.as_bytes(), &salt)?;

        let mut encoded = Zeroizing::new(Vec::with_capacity(salt.len() + key.len()));
        encoded.extend_from_slice(&salt);
        encoded.extend_from_slice(&key);

        Ok(HashedPassword(to_base64(&encoded)))
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Stored credential hash, `base64(salt ‖ derived_key)`
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap a hash loaded from storage
    ///
    /// The content is checked lazily by [`HashedPassword::verify`].
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the encoded hash for storage
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify a password against this hash
    ///
    /// Recomputes the derived key with the stored salt and compares it in
    /// constant time. Returns `Err(MalformedHash)` if the stored value is
    /// not base64 or is shorter than `params.salt_len`.
    pub fn verify(
        &self,
        password: &ClearTextPassword,
        params: &HashParams,
    ) -> Result<bool, PasswordHashError> {
        let decoded =
            Zeroizing::new(from_base64(&self.0).map_err(|_| PasswordHashError::MalformedHash)?);
        if decoded.len() < params.salt_len {
            return Err(PasswordHashError::MalformedHash);
        }
        let (salt, stored_key) = decoded.split_at(params.salt_len);

        let computed = params.derive(password.as_bytes(), salt)?;
        Ok(constant_time_eq(&computed, stored_key))
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HashedPassword").field(&"[HASH]").finish()
    }
}
