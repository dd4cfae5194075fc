//! Session Entity
//!
//! Server-side record correlating a logout-capable handle with the tokens
//! issued at login. Never extended or rotated; it simply ages out at
//! `expires_at` or is deleted at logout.

use chrono::{DateTime, Duration, Utc};

use platform::client::ClientMeta;

use crate::domain::value_object::{UserId, session_id::SessionId};

#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl Session {
    /// New session starting now and living for `ttl`
    pub fn new(
        id: SessionId,
        user_id: UserId,
        access_token: String,
        refresh_token: String,
        ttl: Duration,
        client: &ClientMeta,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            access_token,
            refresh_token,
            expires_at: now + ttl,
            created_at: now,
            last_used_at: now,
            user_agent: client.user_agent.clone(),
            ip_address: client.ip_string(),
        }
    }
}
