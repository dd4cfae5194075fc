//! Value Object Module

pub mod audit_action;
pub mod email;
pub mod login_reason;
pub mod session_id;
pub mod token_kind;
pub mod user_name;
pub mod user_password;
pub mod user_role;

pub use kernel::id::UserId;
