//! Error Kind
//!
//! One variant per HTTP status the API can answer with.

use std::fmt;

/// Error classification
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Forbidden.status_code(), 403);
/// assert!(ErrorKind::InternalServerError.is_server_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed or invalid input
    BadRequest,
    /// Missing, bad or expired credentials
    Unauthorized,
    /// Valid identity, insufficient role
    Forbidden,
    NotFound,
    /// Unique field already taken
    Conflict,
    /// Hashing, signing or store failure
    InternalServerError,
}

impl ErrorKind {
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::InternalServerError => 500,
        }
    }

    /// Whether the failure is ours rather than the caller's
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::InternalServerError)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phrase = match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::Conflict => "Conflict",
            Self::InternalServerError => "Internal Server Error",
        };
        f.write_str(phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let expected = [
            (ErrorKind::BadRequest, 400),
            (ErrorKind::Unauthorized, 401),
            (ErrorKind::Forbidden, 403),
            (ErrorKind::NotFound, 404),
            (ErrorKind::Conflict, 409),
            (ErrorKind::InternalServerError, 500),
        ];
        for (kind, code) in expected {
            assert_eq!(kind.status_code(), code, "{kind}");
            assert_eq!(kind.is_server_error(), code >= 500);
        }
    }
}
