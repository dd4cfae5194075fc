use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Outcome code stored with every login attempt
///
/// Only the audit trail sees these; clients get the coarser
/// `AuthError` messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum LoginAttemptReason {
    #[display("success")]
    Success,
    #[display("invalid_credentials")]
    InvalidCredentials,
    #[display("user_inactive")]
    UserInactive,
    #[display("account_locked")]
    AccountLocked,
    #[display("invalid_password")]
    InvalidPassword,
}

impl LoginAttemptReason {
    pub fn from_db(code: &str) -> Option<Self> {
        use LoginAttemptReason::*;
        match code {
            "success" => Some(Success),
            "invalid_credentials" => Some(InvalidCredentials),
            "user_inactive" => Some(UserInactive),
            "account_locked" => Some(AccountLocked),
            "invalid_password" => Some(InvalidPassword),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, LoginAttemptReason::Success)
    }
}
