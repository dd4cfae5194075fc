//! Entity Module

pub mod audit_log;
pub mod login_attempt;
pub mod session;
pub mod user;
