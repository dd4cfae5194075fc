use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Kind of a signed token, carried in its `type` claim
///
/// One validator serves both kinds; callers compare this explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    #[display("access")]
    Access,
    #[display("refresh")]
    Refresh,
}
