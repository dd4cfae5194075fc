//! Admin User Management Use Case
//!
//! Role and activation changes. Callers must already have passed the
//! admin role check.

use std::sync::Arc;

use platform::client::ClientMeta;

use crate::application::audit::AuditTrail;
use crate::domain::entity::{audit_log::AuditLogEntry, user::User};
use crate::domain::repository::{AuditLogRepository, UserRepository};
use crate::domain::value_object::{UserId, audit_action::AuditAction, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

pub struct AdminUsersUseCase<U, A>
where
    U: UserRepository,
    A: AuditLogRepository,
{
    user_repo: Arc<U>,
    audit: AuditTrail<A>,
}

impl<U, A> AdminUsersUseCase<U, A>
where
    U: UserRepository,
    A: AuditLogRepository,
{
    pub fn new(user_repo: Arc<U>, audit_repo: Arc<A>) -> Self {
        Self {
            user_repo,
            audit: AuditTrail::new(audit_repo),
        }
    }

    pub async fn set_role(
        &self,
        actor: UserId,
        target: UserId,
        role: UserRole,
        client: ClientMeta,
    ) -> AuthResult<User> {
        let mut user = self.find(target).await?;
        let previous = user.role;
        user.set_role(role);
        self.user_repo.update(&user).await?;

        self.audit
            .record(AuditLogEntry::user_event(
                actor,
                AuditAction::ChangeRole,
                target,
                format!("Role changed from {previous} to {role}"),
                &client,
            ))
            .await;

        tracing::info!(actor = %actor, user_id = %target, role = %role, "User role changed");

        Ok(user)
    }

    pub async fn set_active(
        &self,
        actor: UserId,
        target: UserId,
        is_active: bool,
        client: ClientMeta,
    ) -> AuthResult<User> {
        let mut user = self.find(target).await?;
        user.set_active(is_active);
        self.user_repo.update(&user).await?;

        let details = if is_active { "User activated" } else { "User deactivated" };
        self.audit
            .record(AuditLogEntry::user_event(
                actor,
                AuditAction::ChangeStatus,
                target,
                details,
                &client,
            ))
            .await;

        tracing::info!(actor = %actor, user_id = %target, is_active, "User status changed");

        Ok(user)
    }

    async fn find(&self, id: UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
