//! Refresh Use Case
//!
//! Mints a new access/refresh pair from a valid refresh token. Identity
//! and role are re-read from storage rather than trusted from the token.
//! The session record created at login is left untouched.

use std::sync::Arc;

use crate::application::token_service::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::token_kind::TokenKind;
use crate::error::{AuthError, AuthResult};

/// Refresh output
#[derive(Debug)]
pub struct RefreshOutput {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct RefreshUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> RefreshUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<RefreshOutput> {
        let claims = self
            .tokens
            .validate(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        if claims.kind != TokenKind::Refresh {
            return Err(AuthError::InvalidTokenType);
        }

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if !user.is_active {
            return Err(AuthError::AccountInactive);
        }

        let access_token = self
            .tokens
            .issue_access_token(user.id, &user.username, user.role)?;
        let refresh_token = self.tokens.issue_refresh_token(user.id)?;

        tracing::info!(user_id = %user.id, "Tokens refreshed");

        Ok(RefreshOutput {
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::test_support::test_config;
    use crate::domain::entity::user::NewUser;
    use crate::domain::value_object::{
        UserId,
        email::Email,
        user_name::{PersonName, UserName},
        user_password::UserPassword,
        user_role::UserRole,
    };
    use crate::infra::memory::MemoryAuthRepository;

    async fn setup() -> (Arc<MemoryAuthRepository>, Arc<TokenService>, UserId) {
        let repo = Arc::new(MemoryAuthRepository::new());
        let tokens = Arc::new(TokenService::new(&test_config()));
        let mut new_user = NewUser::register(
            UserName::new("carol").unwrap(),
            Email::new("carol@example.com").unwrap(),
            UserPassword::from_db("unused"),
            PersonName::default(),
            PersonName::default(),
        );
        new_user.role = UserRole::Accountant;
        let user = repo.create(&new_user).await.unwrap();
        (repo, tokens, user.id)
    }

    #[tokio::test]
    async fn test_refresh_issues_fresh_pair_with_stored_role() {
        let (repo, tokens, id) = setup().await;
        let uc = RefreshUseCase::new(repo, tokens.clone());

        let out = uc
            .execute(&tokens.issue_refresh_token(id).unwrap())
            .await
            .unwrap();

        let access = tokens.validate(&out.access_token).unwrap();
        assert_eq!(access.kind, TokenKind::Access);
        assert_eq!(access.role, Some(UserRole::Accountant));
        assert_eq!(access.username.as_deref(), Some("carol"));
        assert_eq!(tokens.validate(&out.refresh_token).unwrap().kind, TokenKind::Refresh);
    }

    #[tokio::test]
    async fn test_access_token_is_not_a_refresh_token() {
        let (repo, tokens, id) = setup().await;
        let uc = RefreshUseCase::new(repo, tokens.clone());

        let access = tokens
            .issue_access_token(id, &UserName::new("carol").unwrap(), UserRole::Accountant)
            .unwrap();
        assert!(matches!(
            uc.execute(&access).await,
            Err(AuthError::InvalidTokenType)
        ));
    }

    #[tokio::test]
    async fn test_invalid_or_orphaned_token() {
        let (repo, tokens, _) = setup().await;
        let uc = RefreshUseCase::new(repo, tokens.clone());

        assert!(matches!(
            uc.execute("garbage").await,
            Err(AuthError::InvalidRefreshToken)
        ));

        let orphan = tokens.issue_refresh_token(UserId::from_i64(999)).unwrap();
        assert!(matches!(
            uc.execute(&orphan).await,
            Err(AuthError::InvalidRefreshToken)
        ));
    }

    #[tokio::test]
    async fn test_inactive_user_cannot_refresh() {
        let (repo, tokens, id) = setup().await;
        let mut user = repo.find_by_id(id).await.unwrap().unwrap();
        user.set_active(false);
        repo.update(&user).await.unwrap();

        let uc = RefreshUseCase::new(repo, tokens.clone());
        assert!(matches!(
            uc.execute(&tokens.issue_refresh_token(id).unwrap()).await,
            Err(AuthError::AccountInactive)
        ));
    }
}
