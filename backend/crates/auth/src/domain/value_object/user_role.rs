use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AuthError;

/// Closed set of roles
///
/// Stored and transported as its lowercase code. Unknown codes are
/// rejected at the boundary (registration, admin updates, token decoding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Accountant,
    #[default]
    User,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Accountant, UserRole::User];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Admin => "admin",
            Accountant => "accountant",
            User => "user",
        }
    }
}

impl FromStr for UserRole {
    type Err = AuthError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        use UserRole::*;
        match code {
            "admin" => Ok(Admin),
            "accountant" => Ok(Accountant),
            "user" => Ok(User),
            _ => Err(AuthError::Validation(format!("Invalid role: {code}"))),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
