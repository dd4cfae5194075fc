//! Login Attempt Entity
//!
//! Append-only; used only in aggregate by the lockout check.

use chrono::{DateTime, Utc};

use platform::client::ClientMeta;

use crate::domain::value_object::login_reason::LoginAttemptReason;

#[derive(Debug, Clone)]
pub struct LoginAttempt {
    /// Sanitised username as submitted (the account may not exist)
    pub username: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub success: bool,
    pub reason: LoginAttemptReason,
    pub created_at: DateTime<Utc>,
}

impl LoginAttempt {
    pub fn new(
        username: impl Into<String>,
        client: &ClientMeta,
        reason: LoginAttemptReason,
    ) -> Self {
        Self {
            username: username.into(),
            ip_address: client.ip_string(),
            user_agent: client.user_agent.clone(),
            success: reason.is_success(),
            reason,
            created_at: Utc::now(),
        }
    }
}
