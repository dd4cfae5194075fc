//! Register Use Case
//!
//! Creates a new active user with role `user`.

use std::sync::Arc;

use platform::client::ClientMeta;

use crate::application::audit::AuditTrail;
use crate::application::config::AuthConfig;
use crate::domain::entity::{
    audit_log::AuditLogEntry,
    user::{NewUser, User},
};
use crate::domain::repository::{AuditLogRepository, UserRepository};
use crate::domain::value_object::{
    audit_action::AuditAction,
    email::Email,
    user_name::{PersonName, UserName},
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Register use case
pub struct RegisterUseCase<U, A>
where
    U: UserRepository,
    A: AuditLogRepository,
{
    user_repo: Arc<U>,
    audit: AuditTrail<A>,
    config: Arc<AuthConfig>,
}

impl<U, A> RegisterUseCase<U, A>
where
    U: UserRepository,
    A: AuditLogRepository,
{
    pub fn new(user_repo: Arc<U>, audit_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            audit: AuditTrail::new(audit_repo),
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput, client: ClientMeta) -> AuthResult<User> {
        // Validation first: cheap and side-effect free
        let password = RawPassword::new(input.password)?;
        let email = Email::new(input.email)?;
        let username = UserName::new(&input.username)?;
        let first_name = PersonName::new(&input.first_name)?;
        let last_name = PersonName::new(&input.last_name)?;

        if self
            .user_repo
            .exists_by_username_or_email(&username, &email)
            .await?
        {
            return Err(AuthError::UsernameOrEmailTaken);
        }

        let password = UserPassword::from_raw(&password, &self.config.hash_params)?;

        // The store still enforces uniqueness for concurrent registrations
        let user = self
            .user_repo
            .create(&NewUser::register(
                username, email, password, first_name, last_name,
            ))
            .await?;

        self.audit
            .record(AuditLogEntry::user_event(
                user.id,
                AuditAction::Register,
                user.id,
                "User registered",
                &client,
            ))
            .await;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }
}
