//! Common ID Types
//!
//! Type-safe wrappers for database-assigned numeric identifiers.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Generic typed ID wrapper over a positive `BIGSERIAL` key
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
///
/// let id = UserId::from_i64(42);
/// assert_eq!(id.as_i64(), 42);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

/// Error returned when an ID cannot be parsed from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("ID is not a number")]
    NotANumber,
    #[error("ID must be positive (got {0})")]
    NotPositive(i64),
}

impl<T> Id<T> {
    /// Wrap an existing database key
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying key
    pub const fn as_i64(&self) -> i64 {
        self.value
    }
}

// Manual impls so that `T` needs no bounds of its own.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.trim().parse().map_err(|_| IdParseError::NotANumber)?;
        if value <= 0 {
            return Err(IdParseError::NotPositive(value));
        }
        Ok(Self::from_i64(value))
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_i64)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    pub struct User;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip_i64() {
        let id = UserId::from_i64(7);
        assert_eq!(id.as_i64(), 7);
        assert_eq!(i64::from(id), 7);
    }

    #[test]
    fn test_id_from_str() {
        assert_eq!("12".parse::<UserId>().unwrap(), UserId::from_i64(12));
        assert_eq!("abc".parse::<UserId>(), Err(IdParseError::NotANumber));
        assert_eq!("0".parse::<UserId>(), Err(IdParseError::NotPositive(0)));
        assert_eq!("-3".parse::<UserId>(), Err(IdParseError::NotPositive(-3)));
    }

    #[test]
    fn test_id_serializes_as_number() {
        let id = UserId::from_i64(99);
        assert_eq!(serde_json::to_string(&id).unwrap(), "99");
        let back: UserId = serde_json::from_str("99").unwrap();
        assert_eq!(back, id);
    }
}
