//! Common ID Types
//!
//! Every persisted resource carries two identifiers:
//! - a surrogate key (`BIGSERIAL`) used internally and for foreign keys
//! - a public identifier (UUID v4) exposed in URLs and payloads

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// Internal surrogate key, typed by entity
///
/// Usage:
/// ```
/// use kernel::id::{SurrogateId, markers};
/// type UserId = SurrogateId<markers::User>;
/// let id = UserId::new(42);
/// assert_eq!(id.get(), 42);
/// ```
pub struct SurrogateId<T> {
    value: i64,
    _marker: PhantomData<T>,
}

impl<T> SurrogateId<T> {
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.value
    }
}

// Manual impls: derives would put bounds on the marker type.
impl<T> Clone for SurrogateId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SurrogateId<T> {}

impl<T> PartialEq for SurrogateId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for SurrogateId<T> {}

impl<T> std::hash::Hash for SurrogateId<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for SurrogateId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurrogateId({})", self.value)
    }
}

impl<T> fmt::Display for SurrogateId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for SurrogateId<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

/// Opaque public identifier (UUID v4), typed by entity
pub struct PublicId<T> {
    value: Uuid,
    _marker: PhantomData<T>,
}

/// Error returned when a string is not a valid public identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid public identifier")]
pub struct InvalidPublicId;

impl<T> PublicId<T> {
    /// Create a new random ID (UUID v4)
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Create from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    /// Parse the hyphenated UUID form used in paths and payloads
    pub fn parse_str(s: &str) -> Result<Self, InvalidPublicId> {
        Uuid::parse_str(s.trim())
            .map(Self::from_uuid)
            .map_err(|_| InvalidPublicId)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    /// Convert to UUID
    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

impl<T> Default for PublicId<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for PublicId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PublicId<T> {}

impl<T> PartialEq for PublicId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for PublicId<T> {}

impl<T> std::hash::Hash for PublicId<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for PublicId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicId({})", self.value)
    }
}

impl<T> fmt::Display for PublicId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for PublicId<T> {
    type Err = InvalidPublicId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl<T> From<Uuid> for PublicId<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<PublicId<T>> for Uuid {
    fn from(id: PublicId<T>) -> Self {
        id.value
    }
}

impl<T> serde::Serialize for PublicId<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    pub struct User;

    /// Marker for Product IDs
    pub struct Product;

    /// Marker for password reset token IDs
    pub struct PasswordResetToken;
}

#[cfg(test)]
mod tests {
    use super::*;

    type UserPublicId = PublicId<markers::User>;
    type ProductId = SurrogateId<markers::Product>;

    #[test]
    fn test_public_id_is_v4() {
        let id = UserPublicId::new();
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_public_id_parse() {
        let uuid = Uuid::new_v4();
        let id: UserPublicId = uuid.to_string().parse().unwrap();
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn test_public_id_parse_invalid() {
        assert_eq!(UserPublicId::parse_str("not-a-uuid"), Err(InvalidPublicId));
        assert_eq!(UserPublicId::parse_str(""), Err(InvalidPublicId));
    }

    #[test]
    fn test_public_id_serializes_as_string() {
        let uuid = Uuid::new_v4();
        let id = UserPublicId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }

    #[test]
    fn test_surrogate_id_roundtrip() {
        let id = ProductId::from(7);
        assert_eq!(id.get(), 7);
        assert_eq!(id.to_string(), "7");
    }
}
