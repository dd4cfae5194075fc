//! Auth Middleware
//!
//! Two independently composable gates:
//! - [`require_auth`] validates the bearer access token and puts an
//!   [`AuthContext`] into the request extensions.
//! - [`require_role`] checks that context's role against a [`RoleGuard`].
//!
//! Order matters: the role gate must run after the authentication gate.
//! With axum's `route_layer`, the layer added last runs first.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::token_service::TokenService;
use crate::domain::value_object::{UserId, token_kind::TokenKind, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Request-scoped identity set by the authentication gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: UserId,
    pub username: String,
    pub role: UserRole,
}

/// Resolve the caller's identity from the `Authorization` header
///
/// Pure over the header and the token service; never touches the store.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> AuthResult<AuthContext> {
    let value = headers
        .get(header::AUTHORIZATION)
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingAuthorizationHeader)?;

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthError::MissingBearerToken)?;

    let claims = tokens.validate(token)?;

    if claims.kind != TokenKind::Access {
        tracing::debug!(user_id = claims.user_id, kind = %claims.kind, "Non-access token at gate");
        return Err(AuthError::InvalidTokenType);
    }

    // Access tokens always carry both; a signed token without them is malformed
    let (Some(username), Some(role)) = (claims.username, claims.role) else {
        return Err(AuthError::InvalidToken);
    };

    Ok(AuthContext {
        user_id: UserId::from_i64(claims.user_id),
        username,
        role,
    })
}

/// Authentication gate
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let context = authenticate(req.headers(), &tokens)?;
    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

/// Set of roles allowed through the authorization gate
#[derive(Debug, Clone)]
pub struct RoleGuard {
    allowed: Arc<[UserRole]>,
}

impl RoleGuard {
    pub fn new(allowed: impl IntoIterator<Item = UserRole>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn admin_only() -> Self {
        Self::new([UserRole::Admin])
    }

    /// A missing context is a 403, not a crash
    pub fn check(&self, context: Option<&AuthContext>) -> AuthResult<()> {
        match context {
            Some(ctx) if self.allowed.contains(&ctx.role) => Ok(()),
            _ => Err(AuthError::Forbidden),
        }
    }
}

/// Authorization gate
pub async fn require_role(
    State(guard): State<RoleGuard>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    guard.check(req.extensions().get::<AuthContext>())?;
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }
}
