//! In-Memory Repository Implementation
//!
//! Lock-guarded maps behind an `Arc`, so clones share one store. Each
//! instance is independent; nothing is global.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::entity::{
    audit_log::AuditLogEntry,
    login_attempt::LoginAttempt,
    session::Session,
    user::{NewUser, User},
};
use crate::domain::repository::{
    AuditLogRepository, LoginAttemptRepository, SessionRepository, UserRepository,
};
use crate::domain::value_object::{
    UserId, email::Email, session_id::SessionId, user_name::UserName,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Inner {
    users: RwLock<BTreeMap<i64, User>>,
    next_user_id: AtomicI64,
    sessions: RwLock<HashMap<SessionId, Session>>,
    login_attempts: RwLock<Vec<LoginAttempt>>,
    audit_log: RwLock<Vec<AuditLogEntry>>,
    fail_attempt_writes: AtomicBool,
}

/// In-memory auth repository (tests, local runs)
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    inner: Arc<Inner>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attempt verbatim, keeping its `created_at`
    pub fn insert_login_attempt(&self, attempt: LoginAttempt) {
        self.inner.login_attempts.write().push(attempt);
    }

    pub fn clear_login_attempts(&self) {
        self.inner.login_attempts.write().clear();
    }

    /// Snapshot of recorded attempts, oldest first
    pub fn login_attempts(&self) -> Vec<LoginAttempt> {
        self.inner.login_attempts.read().clone()
    }

    /// Snapshot of audit entries, oldest first
    pub fn audit_entries(&self) -> Vec<AuditLogEntry> {
        self.inner.audit_log.read().clone()
    }

    pub fn session_count(&self) -> usize {
        self.inner.sessions.read().len()
    }

    /// Make attempt writes fail, to exercise best-effort recording
    pub fn fail_attempt_writes(&self, fail: bool) {
        self.inner.fail_attempt_writes.store(fail, Ordering::SeqCst);
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for MemoryAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut users = self.inner.users.write();
        if users
            .values()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(AuthError::UsernameOrEmailTaken);
        }

        let id = self.inner.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = user.clone().into_user(UserId::from_i64(id), Utc::now());
        users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.inner.users.read().get(&id.as_i64()).cloned())
    }

    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .inner
            .users
            .read()
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn exists_by_username_or_email(
        &self,
        username: &UserName,
        email: &Email,
    ) -> AuthResult<bool> {
        Ok(self
            .inner
            .users
            .read()
            .values()
            .any(|u| &u.username == username || &u.email == email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.inner.users.write();
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(AuthError::UsernameOrEmailTaken);
        }
        let slot = users
            .get_mut(&user.id.as_i64())
            .ok_or(AuthError::UserNotFound)?;
        *slot = user.clone();
        Ok(())
    }

    async fn update_last_login(&self, id: UserId, at: DateTime<Utc>) -> AuthResult<()> {
        let mut users = self.inner.users.write();
        let user = users.get_mut(&id.as_i64()).ok_or(AuthError::UserNotFound)?;
        user.last_login = Some(at);
        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for MemoryAuthRepository {
    /// Mirrors the primary key and the unique token columns of `sessions`
    async fn create(&self, session: &Session) -> AuthResult<()> {
        let mut sessions = self.inner.sessions.write();
        if sessions.contains_key(&session.id)
            || sessions.values().any(|s| {
                s.access_token == session.access_token || s.refresh_token == session.refresh_token
            })
        {
            return Err(AuthError::Internal("duplicate session row".into()));
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: &SessionId) -> AuthResult<UserId> {
        self.inner
            .sessions
            .write()
            .remove(id)
            .map(|s| s.user_id)
            .ok_or(AuthError::SessionNotFound)
    }
}

// ============================================================================
// Login Attempt Repository Implementation
// ============================================================================

impl LoginAttemptRepository for MemoryAuthRepository {
    async fn create(&self, attempt: &LoginAttempt) -> AuthResult<()> {
        if self.inner.fail_attempt_writes.load(Ordering::SeqCst) {
            return Err(AuthError::Internal("login attempt store unavailable".into()));
        }
        self.inner.login_attempts.write().push(attempt.clone());
        Ok(())
    }

    async fn count_failed_since(&self, username: &str, since: DateTime<Utc>) -> AuthResult<u64> {
        let count = self
            .inner
            .login_attempts
            .read()
            .iter()
            .filter(|a| a.username == username && !a.success && a.created_at > since)
            .count();
        Ok(count as u64)
    }
}

// ============================================================================
// Audit Log Repository Implementation
// ============================================================================

impl AuditLogRepository for MemoryAuthRepository {
    async fn create(&self, entry: &AuditLogEntry) -> AuthResult<()> {
        self.inner.audit_log.write().push(entry.clone());
        Ok(())
    }
}
