//! User Password Value Object
//!
//! Domain value object for user passwords.
//! Delegates to `platform::password` for cryptographic operations and moves
//! the CPU-bound bcrypt work onto tokio's blocking pool.
//!
//! ## Usage
//! ```rust,no_run
//! # async fn demo() -> auth::AuthResult<()> {
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("MySecurePass123!".to_string()).unwrap();
//! let hashed = UserPassword::hash(raw, 12).await?;
//!
//! let attempt = RawPassword::candidate("MySecurePass123!".to_string());
//! assert!(hashed.verify(attempt).await);
//! # Ok(())
//! # }
//! ```

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with policy validation
    ///
    /// ## Validation Rules
    /// - Minimum 8 characters
    /// - Maximum 72 bytes
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        ClearTextPassword::new(raw).map(Self)
    }

    /// Wrap a login attempt without policy checks
    pub fn candidate(raw: String) -> Self {
        Self(ClearTextPassword::candidate(raw))
    }

    /// Whether a confirmation field repeats this password exactly
    pub fn confirmed_by(&self, confirmation: &str) -> bool {
        self.0.matches(confirmation)
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, safe to store)
// ============================================================================

/// Stored password hash (bcrypt)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password on the blocking pool
    ///
    /// ## Arguments
    /// * `raw` - Validated password; consumed so the clear text is zeroized
    ///   once hashing completes
    /// * `cost` - bcrypt work factor
    pub async fn hash(raw: RawPassword, cost: u32) -> AuthResult<Self> {
        let hashed = tokio::task::spawn_blocking(move || raw.0.hash(cost))
            .await
            .map_err(|e| AuthError::Internal(format!("Hashing task failed: {e}")))?
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(Self(hashed))
    }

    /// Verify a candidate on the blocking pool
    ///
    /// A malformed stored hash or a failed task both yield `false`.
    pub async fn verify(&self, raw: RawPassword) -> bool {
        let hashed = self.0.clone();
        match tokio::task::spawn_blocking(move || hashed.verify(&raw.0)).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!(error = %e, "Password verification task failed");
                false
            }
        }
    }

    /// Create from database value
    pub fn from_db(hash: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(hash))
    }

    /// Get the hash string for database storage
    pub fn as_str(&self) -> &str {
        self.0.as_hash_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_raw_password_policy() {
        assert!(matches!(
            RawPassword::new("short".to_string()),
            Err(PasswordPolicyError::TooShort { .. })
        ));
        assert!(RawPassword::new("longenough1".to_string()).is_ok());
    }

    #[test]
    fn test_confirmation() {
        let raw = RawPassword::new("longenough1".to_string()).unwrap();
        assert!(raw.confirmed_by("longenough1"));
        assert!(!raw.confirmed_by("longenough2"));
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let raw = RawPassword::new("longenough1".to_string()).unwrap();
        let hashed = UserPassword::hash(raw, TEST_COST).await.unwrap();

        assert!(hashed.as_str().starts_with("$2"));
        assert!(
            hashed
                .verify(RawPassword::candidate("longenough1".to_string()))
                .await
        );
        assert!(
            !hashed
                .verify(RawPassword::candidate("wrong-password".to_string()))
                .await
        );
    }

    #[tokio::test]
    async fn test_malformed_hash_is_false() {
        let stored = UserPassword::from_db("not-a-bcrypt-hash");
        assert!(
            !stored
                .verify(RawPassword::candidate("longenough1".to_string()))
                .await
        );
    }

    #[test]
    fn test_debug_redacted() {
        let raw = RawPassword::candidate("topsecret".to_string());
        assert!(!format!("{:?}", raw).contains("topsecret"));
    }
}
