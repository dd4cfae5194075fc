use derive_more::Display;
use serde::Serialize;

/// Security-relevant action recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    #[display("register")]
    Register,
    #[display("login")]
    Login,
    #[display("logout")]
    Logout,
    #[display("update")]
    Update,
    #[display("change_password")]
    ChangePassword,
    #[display("change_role")]
    ChangeRole,
    #[display("change_status")]
    ChangeStatus,
}

/// Kind of resource an audit entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum AuditResource {
    #[display("user")]
    User,
    #[display("session")]
    Session,
}
