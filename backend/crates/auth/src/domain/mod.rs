//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    audit_log::AuditLogEntry, login_attempt::LoginAttempt, session::Session, user::User,
};
pub use repository::{
    AuditLogRepository, AuthStore, LoginAttemptRepository, SessionRepository, UserRepository,
};
