//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer (`infra::postgres`, `infra::memory`).

use chrono::{DateTime, Utc};

use crate::domain::entity::{
    audit_log::AuditLogEntry,
    login_attempt::LoginAttempt,
    session::Session,
    user::{NewUser, User},
};
use crate::domain::value_object::{
    UserId, email::Email, session_id::SessionId, user_name::UserName,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user and return it with its assigned id
    ///
    /// Fails with `UsernameOrEmailTaken` on a uniqueness violation.
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Find user by (sanitised) user name
    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>>;

    /// Check whether the user name or the email is already taken
    async fn exists_by_username_or_email(
        &self,
        username: &UserName,
        email: &Email,
    ) -> AuthResult<bool>;

    /// Persist profile, password, role and status changes
    ///
    /// Fails with `UserNotFound` if the row is gone, `UsernameOrEmailTaken`
    /// if a changed email collides.
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Stamp the last successful login
    async fn update_last_login(&self, id: UserId, at: DateTime<Utc>) -> AuthResult<()>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Persist a new session
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Delete a session, returning the id of the user that owned it
    ///
    /// Fails with `SessionNotFound` when no row was removed.
    async fn delete_by_id(&self, id: &SessionId) -> AuthResult<UserId>;
}

/// Login attempt repository trait
#[trait_variant::make(LoginAttemptRepository: Send)]
pub trait LocalLoginAttemptRepository {
    /// Append an attempt
    async fn create(&self, attempt: &LoginAttempt) -> AuthResult<()>;

    /// Count failed attempts for `username` strictly after `since`
    async fn count_failed_since(&self, username: &str, since: DateTime<Utc>) -> AuthResult<u64>;
}

/// Audit log repository trait
#[trait_variant::make(AuditLogRepository: Send)]
pub trait LocalAuditLogRepository {
    /// Append an entry
    async fn create(&self, entry: &AuditLogEntry) -> AuthResult<()>;
}

/// Everything the HTTP layer needs from one backing store
pub trait AuthStore:
    UserRepository
    + SessionRepository
    + LoginAttemptRepository
    + AuditLogRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> AuthStore for T where
    T: UserRepository
        + SessionRepository
        + LoginAttemptRepository
        + AuditLogRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
