//! Logout Use Case
//!
//! Deletes the session named by the client. Tokens issued with it stay
//! valid until they expire.

use std::sync::Arc;

use platform::client::ClientMeta;

use crate::application::audit::AuditTrail;
use crate::domain::entity::audit_log::AuditLogEntry;
use crate::domain::repository::{AuditLogRepository, SessionRepository};
use crate::domain::value_object::{audit_action::AuditAction, session_id::SessionId};
use crate::error::AuthResult;

pub struct LogoutUseCase<S, A>
where
    S: SessionRepository,
    A: AuditLogRepository,
{
    session_repo: Arc<S>,
    audit: AuditTrail<A>,
}

impl<S, A> LogoutUseCase<S, A>
where
    S: SessionRepository,
    A: AuditLogRepository,
{
    pub fn new(session_repo: Arc<S>, audit_repo: Arc<A>) -> Self {
        Self {
            session_repo,
            audit: AuditTrail::new(audit_repo),
        }
    }

    /// Fails with `SessionNotFound` for an unknown or already-deleted id
    pub async fn execute(&self, session_id: &SessionId, client: ClientMeta) -> AuthResult<()> {
        let user_id = self.session_repo.delete_by_id(session_id).await?;

        self.audit
            .record(AuditLogEntry::session_event(
                user_id,
                AuditAction::Logout,
                "User logged out",
                &client,
            ))
            .await;

        tracing::info!(user_id = %user_id, "User logged out");

        Ok(())
    }
}
