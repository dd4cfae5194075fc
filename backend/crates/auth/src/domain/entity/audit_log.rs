//! Audit Log Entity

use chrono::{DateTime, Utc};

use platform::client::ClientMeta;

use crate::domain::value_object::{
    UserId,
    audit_action::{AuditAction, AuditResource},
};

/// Append-only audit entry, write-only from this crate's perspective
#[derive(Debug, Clone)]
pub struct AuditLogEntry {
    pub user_id: Option<UserId>,
    pub action: AuditAction,
    pub resource_type: AuditResource,
    pub resource_id: Option<String>,
    pub details: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Entry about a user record, performed by `actor`
    pub fn user_event(
        actor: UserId,
        action: AuditAction,
        subject: UserId,
        details: impl Into<String>,
        client: &ClientMeta,
    ) -> Self {
        Self {
            user_id: Some(actor),
            action,
            resource_type: AuditResource::User,
            resource_id: Some(subject.to_string()),
            details: details.into(),
            ip_address: client.ip_string(),
            user_agent: client.user_agent.clone(),
            created_at: Utc::now(),
        }
    }

    /// Entry about a session owned by `user_id`
    ///
    /// The session id itself is a bearer credential and is not recorded.
    pub fn session_event(
        user_id: UserId,
        action: AuditAction,
        details: impl Into<String>,
        client: &ClientMeta,
    ) -> Self {
        Self {
            user_id: Some(user_id),
            action,
            resource_type: AuditResource::Session,
            resource_id: None,
            details: details.into(),
            ip_address: client.ip_string(),
            user_agent: client.user_agent.clone(),
            created_at: Utc::now(),
        }
    }
}
