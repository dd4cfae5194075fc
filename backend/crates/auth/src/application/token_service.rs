//! Token Service
//!
//! Issues and validates HS256-signed access and refresh tokens.
//!
//! `validate` checks signature, algorithm, issuer and expiry only. It does
//! not look at the `type` claim: callers compare [`Claims::kind`] against
//! the kind they require.

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use platform::crypto::{random_bytes, to_base64_url};

use crate::application::config::AuthConfig;
use crate::domain::value_object::{
    UserId, token_kind::TokenKind, user_name::UserName, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Signed claim bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    /// Access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    /// Random per-token id; two tokens issued in the same second still differ
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId::from_i64(self.user_id)
    }
}

/// Token issuing / validation service
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.set_issuer(&[config.issuer.as_str()]);

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret()),
            validation,
            issuer: config.issuer.clone(),
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
        }
    }

    /// Short-lived token carrying identity and role
    pub fn issue_access_token(
        &self,
        user_id: UserId,
        username: &UserName,
        role: UserRole,
    ) -> AuthResult<String> {
        let now = Utc::now();
        self.sign(&Claims {
            user_id: user_id.as_i64(),
            username: Some(username.to_string()),
            role: Some(role),
            kind: TokenKind::Access,
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
            iss: self.issuer.clone(),
            jti: new_token_id()?,
        })
    }

    /// Long-lived token carrying only the user id
    ///
    /// Role and username are re-read from storage at refresh time.
    pub fn issue_refresh_token(&self, user_id: UserId) -> AuthResult<String> {
        let now = Utc::now();
        self.sign(&Claims {
            user_id: user_id.as_i64(),
            username: None,
            role: None,
            kind: TokenKind::Refresh,
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
            iss: self.issuer.clone(),
            jti: new_token_id()?,
        })
    }

    /// Verify signature, algorithm, issuer and expiry
    pub fn validate(&self, token: &str) -> AuthResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })
    }

    fn sign(&self, claims: &Claims) -> AuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }
}

/// Length in bytes of the random `jti`
const TOKEN_ID_LEN: usize = 16;

fn new_token_id() -> AuthResult<String> {
    random_bytes(TOKEN_ID_LEN)
        .map(|bytes| to_base64_url(&bytes))
        .map_err(|e| AuthError::Internal(format!("Failed to generate token id: {e}")))
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("keys", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::test_support::test_config;

    fn service() -> TokenService {
        TokenService::new(&test_config())
    }

    fn bob() -> UserName {
        UserName::new("bob").unwrap()
    }

    #[test]
    fn test_access_token_roundtrip() {
        let svc = service();
        let token = svc
            .issue_access_token(UserId::from_i64(1), &bob(), UserRole::Admin)
            .unwrap();

        let claims = svc.validate(&token).unwrap();
        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.username.as_deref(), Some("bob"));
        assert_eq!(claims.role, Some(UserRole::Admin));
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.iss, "e-tax-api");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_refresh_token_carries_no_identity() {
        let svc = service();
        let token = svc.issue_refresh_token(UserId::from_i64(7)).unwrap();

        let claims = svc.validate(&token).unwrap();
        assert_eq!(claims.user_id(), UserId::from_i64(7));
        assert_eq!(claims.kind, TokenKind::Refresh);
        assert!(claims.username.is_none());
        assert!(claims.role.is_none());
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let svc = service();
        let now = Utc::now().timestamp();
        let token = svc
            .sign(&Claims {
                user_id: 1,
                username: Some("bob".into()),
                role: Some(UserRole::User),
                kind: TokenKind::Access,
                iat: now - 3600,
                exp: now - 10,
                iss: "e-tax-api".into(),
                jti: "t1".into(),
            })
            .unwrap();

        assert!(matches!(svc.validate(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let other = TokenService::new(
            &AuthConfig::new("another-secret-key-that-is-32-bytes-long").unwrap(),
        );
        let token = other.issue_refresh_token(UserId::from_i64(1)).unwrap();

        assert!(matches!(service().validate(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let svc = service();
        let now = Utc::now().timestamp();
        let token = svc
            .sign(&Claims {
                user_id: 1,
                username: None,
                role: None,
                kind: TokenKind::Refresh,
                iat: now,
                exp: now + 600,
                iss: "someone-else".into(),
                jti: "t2".into(),
            })
            .unwrap();

        assert!(matches!(svc.validate(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: 1,
            username: None,
            role: None,
            kind: TokenKind::Refresh,
            iat: now,
            exp: now + 600,
            iss: "e-tax-api".into(),
            jti: "t3".into(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret()),
        )
        .unwrap();

        assert!(matches!(
            TokenService::new(&config).validate(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_tokens_issued_back_to_back_differ() {
        let svc = service();
        let id = UserId::from_i64(1);

        let a1 = svc.issue_access_token(id, &bob(), UserRole::User).unwrap();
        let a2 = svc.issue_access_token(id, &bob(), UserRole::User).unwrap();
        assert_ne!(a1, a2);

        let r1 = svc.issue_refresh_token(id).unwrap();
        let r2 = svc.issue_refresh_token(id).unwrap();
        assert_ne!(r1, r2);

        let (c1, c2) = (svc.validate(&a1).unwrap(), svc.validate(&a2).unwrap());
        assert_ne!(c1.jti, c2.jti);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            service().validate("invalid.token.here"),
            Err(AuthError::InvalidToken)
        ));
    }
}
