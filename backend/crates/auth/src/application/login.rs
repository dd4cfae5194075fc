//! Login Use Case
//!
//! Authenticates username + password, issues an access/refresh token pair
//! and persists a session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::client::ClientMeta;

use crate::application::audit::AuditTrail;
use crate::application::config::AuthConfig;
use crate::application::login_attempts::LoginAttemptTracker;
use crate::application::token_service::TokenService;
use crate::domain::entity::{audit_log::AuditLogEntry, session::Session, user::User};
use crate::domain::repository::{
    AuditLogRepository, LoginAttemptRepository, SessionRepository, UserRepository,
};
use crate::domain::value_object::{
    audit_action::AuditAction, login_reason::LoginAttemptReason, session_id::SessionId,
    user_name::UserName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub access_token: String,
    pub refresh_token: String,
    pub session_id: SessionId,
    pub user: User,
    /// Session expiry
    pub expires_at: DateTime<Utc>,
}

/// Login use case
pub struct LoginUseCase<U, S, L, A>
where
    U: UserRepository,
    S: SessionRepository,
    L: LoginAttemptRepository,
    A: AuditLogRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    attempts: LoginAttemptTracker<L>,
    audit: AuditTrail<A>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U, S, L, A> LoginUseCase<U, S, L, A>
where
    U: UserRepository,
    S: SessionRepository,
    L: LoginAttemptRepository,
    A: AuditLogRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        attempt_repo: Arc<L>,
        audit_repo: Arc<A>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            attempts: LoginAttemptTracker::new(attempt_repo, &config),
            audit: AuditTrail::new(audit_repo),
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput, client: ClientMeta) -> AuthResult<LoginOutput> {
        // A name that sanitises to nothing cannot match any account
        let Ok(username) = UserName::new(&input.username) else {
            self.reject(&input.username, &client, LoginAttemptReason::InvalidCredentials)
                .await;
            return Err(AuthError::InvalidCredentials);
        };

        let Some(user) = self.user_repo.find_by_username(&username).await? else {
            self.reject(username.as_str(), &client, LoginAttemptReason::InvalidCredentials)
                .await;
            return Err(AuthError::InvalidCredentials);
        };

        if !user.is_active {
            self.reject(username.as_str(), &client, LoginAttemptReason::UserInactive)
                .await;
            return Err(AuthError::AccountInactive);
        }

        // Lock state is checked before the password so a locked account
        // gives no password oracle. A store failure here fails closed.
        if self.attempts.is_locked(user.username.as_str()).await? {
            self.reject(username.as_str(), &client, LoginAttemptReason::AccountLocked)
                .await;
            return Err(AuthError::AccountLocked);
        }

        let password = RawPassword::submitted(input.password);
        if !user.password.verify(&password, &self.config.hash_params)? {
            self.reject(username.as_str(), &client, LoginAttemptReason::InvalidPassword)
                .await;
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self
            .tokens
            .issue_access_token(user.id, &user.username, user.role)?;
        let refresh_token = self.tokens.issue_refresh_token(user.id)?;

        let session = Session::new(
            SessionId::generate()?,
            user.id,
            access_token.clone(),
            refresh_token.clone(),
            self.config.session_ttl,
            &client,
        );
        self.session_repo.create(&session).await?;

        let now = Utc::now();
        self.user_repo.update_last_login(user.id, now).await?;

        self.attempts
            .record(username.as_str(), &client, LoginAttemptReason::Success)
            .await;
        self.audit
            .record(AuditLogEntry::session_event(
                user.id,
                AuditAction::Login,
                "User logged in",
                &client,
            ))
            .await;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            role = %user.role,
            "User logged in"
        );

        let mut user = user;
        user.last_login = Some(now);

        Ok(LoginOutput {
            access_token,
            refresh_token,
            session_id: session.id,
            user,
            expires_at: session.expires_at,
        })
    }

    async fn reject(&self, username: &str, client: &ClientMeta, reason: LoginAttemptReason) {
        tracing::warn!(username = %username, reason = %reason, "Login rejected");
        self.attempts.record(username, client, reason).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::test_support::test_config;
    use crate::domain::entity::login_attempt::LoginAttempt;
    use crate::domain::entity::user::NewUser;
    use crate::domain::value_object::{
        email::Email, user_name::PersonName, user_password::UserPassword,
    };
    use crate::infra::memory::MemoryAuthRepository;
    use chrono::Duration;

    struct Fixture {
        repo: Arc<MemoryAuthRepository>,
        use_case: LoginUseCase<
            MemoryAuthRepository,
            MemoryAuthRepository,
            MemoryAuthRepository,
            MemoryAuthRepository,
        >,
    }

    async fn fixture() -> Fixture {
        let config = Arc::new(test_config());
        let repo = Arc::new(MemoryAuthRepository::new());

        let raw = RawPassword::new("Str0ng!Pw".to_string()).unwrap();
        let new_user = NewUser::register(
            UserName::new("bob").unwrap(),
            Email::new("bob@example.com").unwrap(),
            UserPassword::from_raw(&raw, &config.hash_params).unwrap(),
            PersonName::new("Bob").unwrap(),
            PersonName::new("Builder").unwrap(),
        );
        UserRepository::create(&*repo, &new_user).await.unwrap();

        let use_case = LoginUseCase::new(
            repo.clone(),
            repo.clone(),
            repo.clone(),
            repo.clone(),
            Arc::new(TokenService::new(&config)),
            config,
        );
        Fixture { repo, use_case }
    }

    fn input(username: &str, password: &str) -> LoginInput {
        LoginInput {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn backdated_failure(minutes_ago: i64) -> LoginAttempt {
        let mut attempt = LoginAttempt::new(
            "bob",
            &ClientMeta::default(),
            LoginAttemptReason::InvalidPassword,
        );
        attempt.created_at = Utc::now() - Duration::minutes(minutes_ago);
        attempt
    }

    #[tokio::test]
    async fn test_login_success() {
        let f = fixture().await;
        let out = f
            .use_case
            .execute(input("bob", "Str0ng!Pw"), ClientMeta::default())
            .await
            .unwrap();

        assert!(!out.access_token.is_empty());
        assert!(!out.refresh_token.is_empty());
        assert!(!out.session_id.as_str().is_empty());
        assert!(out.user.last_login.is_some());
        assert_eq!(f.repo.session_count(), 1);

        let attempts = f.repo.login_attempts();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].reason, LoginAttemptReason::Success);
        assert!(attempts[0].success);
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_look_alike() {
        let f = fixture().await;

        let unknown = f
            .use_case
            .execute(input("nobody", "Str0ng!Pw"), ClientMeta::default())
            .await
            .unwrap_err();
        let wrong = f
            .use_case
            .execute(input("bob", "nope"), ClientMeta::default())
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());

        let reasons: Vec<_> = f.repo.login_attempts().iter().map(|a| a.reason).collect();
        assert_eq!(
            reasons,
            vec![
                LoginAttemptReason::InvalidCredentials,
                LoginAttemptReason::InvalidPassword
            ]
        );
    }

    #[tokio::test]
    async fn test_inactive_user_rejected() {
        let f = fixture().await;
        let mut user = f
            .repo
            .find_by_username(&UserName::new("bob").unwrap())
            .await
            .unwrap()
            .unwrap();
        user.set_active(false);
        f.repo.update(&user).await.unwrap();

        let err = f
            .use_case
            .execute(input("bob", "Str0ng!Pw"), ClientMeta::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AccountInactive));
        assert_eq!(f.repo.login_attempts()[0].reason, LoginAttemptReason::UserInactive);
    }

    #[tokio::test]
    async fn test_lockout_precedes_password_check_and_expires() {
        let f = fixture().await;
        for _ in 0..5 {
            f.repo.insert_login_attempt(backdated_failure(1));
        }

        // Correct password, still locked
        let err = f
            .use_case
            .execute(input("bob", "Str0ng!Pw"), ClientMeta::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AccountLocked));
        assert_eq!(
            f.repo.login_attempts().last().unwrap().reason,
            LoginAttemptReason::AccountLocked
        );
        assert_eq!(f.repo.session_count(), 0);

        // Same failures, 15+ minutes later
        f.repo.clear_login_attempts();
        for _ in 0..5 {
            f.repo.insert_login_attempt(backdated_failure(16));
        }
        let err = f
            .use_case
            .execute(input("bob", "wrong"), ClientMeta::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(
            f.repo.login_attempts().last().unwrap().reason,
            LoginAttemptReason::InvalidPassword
        );
    }

    #[tokio::test]
    async fn test_attempt_write_failure_does_not_abort_login() {
        let f = fixture().await;
        f.repo.fail_attempt_writes(true);

        let out = f
            .use_case
            .execute(input("bob", "Str0ng!Pw"), ClientMeta::default())
            .await;
        assert!(out.is_ok());
    }

    #[tokio::test]
    async fn test_sanitised_username_matches() {
        let f = fixture().await;
        let out = f
            .use_case
            .execute(input("<bob>", "Str0ng!Pw"), ClientMeta::default())
            .await;
        assert!(out.is_ok());
    }
}
