//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;

use chrono::Duration;
use platform::password::HashParams;
use thiserror::Error;

/// Minimum accepted signing secret length in bytes (HS256 key size)
pub const MIN_SECRET_LENGTH: usize = 32;

/// Environment variable holding the signing secret
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Configuration errors; any of these aborts startup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{JWT_SECRET_ENV} is not set")]
    MissingSecret,

    #[error("JWT secret must be at least {min} bytes (got {actual})")]
    SecretTooShort { min: usize, actual: usize },
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    jwt_secret: Vec<u8>,
    /// `iss` claim written and required
    pub issuer: String,
    /// Access token lifetime (15 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (7 days)
    pub refresh_token_ttl: Duration,
    /// Session record lifetime (24 hours)
    pub session_ttl: Duration,
    /// Trailing window over which failed logins are counted (15 minutes)
    pub lockout_window: Duration,
    /// Failed logins within the window that lock the account (5)
    pub lockout_threshold: u64,
    /// Argon2id cost parameters
    pub hash_params: HashParams,
}

impl AuthConfig {
    /// Create config with the given secret and default policy values
    ///
    /// There is deliberately no default secret.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if jwt_secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort {
                min: MIN_SECRET_LENGTH,
                actual: jwt_secret.len(),
            });
        }

        Ok(Self {
            jwt_secret,
            issuer: "e-tax-api".to_string(),
            access_token_ttl: Duration::minutes(15),
            refresh_token_ttl: Duration::days(7),
            session_ttl: Duration::hours(24),
            lockout_window: Duration::minutes(15),
            lockout_threshold: 5,
            hash_params: HashParams::DEFAULT,
        })
    }

    /// Read the secret from `JWT_SECRET`
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var(JWT_SECRET_ENV).map_err(|_| ConfigError::MissingSecret)?;
        Self::new(secret)
    }

    /// Override the Argon2id parameters
    pub fn with_hash_params(mut self, hash_params: HashParams) -> Self {
        self.hash_params = hash_params;
        self
    }

    pub(crate) fn jwt_secret(&self) -> &[u8] {
        &self.jwt_secret
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("session_ttl", &self.session_ttl)
            .field("lockout_window", &self.lockout_window)
            .field("lockout_threshold", &self.lockout_threshold)
            .field("hash_params", &self.hash_params)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub const TEST_SECRET: &str = "test-secret-key-that-is-at-least-32-bytes";

    /// Config with cheap hashing for fast tests
    pub fn test_config() -> AuthConfig {
        AuthConfig::new(TEST_SECRET)
            .unwrap()
            .with_hash_params(HashParams {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
                ..HashParams::DEFAULT
            })
    }
}
