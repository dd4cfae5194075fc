//! Audit Trail
//!
//! Best-effort writer for security-relevant events.

use std::sync::Arc;

use crate::domain::entity::audit_log::AuditLogEntry;
use crate::domain::repository::AuditLogRepository;

pub struct AuditTrail<A>
where
    A: AuditLogRepository,
{
    repo: Arc<A>,
}

impl<A> AuditTrail<A>
where
    A: AuditLogRepository,
{
    pub fn new(repo: Arc<A>) -> Self {
        Self { repo }
    }

    /// Append an entry; a store failure is logged and swallowed
    pub async fn record(&self, entry: AuditLogEntry) {
        if let Err(e) = self.repo.create(&entry).await {
            tracing::warn!(
                action = %entry.action,
                resource = %entry.resource_type,
                error = %e,
                "Failed to write audit log entry"
            );
        }
    }
}
