//! Password Hashing and Verification
//!
//! bcrypt-based password handling with:
//! - Zeroization of clear text on drop
//! - Length policy checked before any hashing work
//! - Verification that never errors on a malformed stored hash
//!
//! bcrypt is CPU-bound; async callers should run [`ClearTextPassword::hash`]
//! and [`HashedPassword::verify`] on a blocking thread.

use std::fmt;
use std::ops::RangeInclusive;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in bytes (bcrypt ignores everything after 72)
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Work factor used when none is configured
pub const DEFAULT_COST: u32 = 12;

/// Work factors bcrypt accepts
pub const COST_RANGE: RangeInclusive<u32> = 4..=31;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} bytes")]
    TooLong { max: usize, actual: usize },
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(#[from] bcrypt::BcryptError),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("correct horse".to_string()).unwrap();
/// let hashed = password.hash(4).unwrap();
/// assert!(hashed.verify(&password));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation
    ///
    /// Length is counted in characters for the minimum and in bytes for the
    /// maximum. Passwords are not trimmed; whitespace is significant.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let char_count = raw.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if raw.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: raw.len(),
            });
        }

        Ok(Self(raw))
    }

    /// Wrap a candidate password without policy checks
    ///
    /// Used for login attempts: a candidate that would fail the policy simply
    /// fails verification, and the caller must not learn why.
    pub fn candidate(raw: String) -> Self {
        Self(raw)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Compare against another clear text value (used for confirmation fields)
    pub fn matches(&self, other: &str) -> bool {
        self.0 == other
    }

    /// Hash the password with bcrypt
    ///
    /// ## Arguments
    /// * `cost` - bcrypt work factor (4..=31)
    ///
    /// ## Returns
    /// Modular crypt string (`$2b$<cost>$...`) wrapped in `HashedPassword`
    pub fn hash(&self, cost: u32) -> Result<HashedPassword, PasswordHashError> {
        let hash = bcrypt::hash(self.as_bytes(), cost)?;
        Ok(HashedPassword { hash })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// bcrypt hash in modular crypt format
///
/// The string embeds algorithm version, cost and salt, so verification needs
/// nothing else.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a stored hash without checking it
    ///
    /// A corrupt stored value then fails [`verify`](Self::verify) instead of
    /// failing the row load.
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self { hash: s.into() }
    }

    /// Get the hash string for storage
    pub fn as_hash_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Returns `false` for a mismatch and for a malformed hash alike.
    /// bcrypt only reads the first 72 bytes, so a longer candidate can never
    /// be the stored password and is rejected outright.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        if password.as_bytes().len() > MAX_PASSWORD_BYTES {
            return false;
        }
        bcrypt::verify(password.as_bytes(), &self.hash).unwrap_or(false)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("short".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::TooShort { min: 8, actual: 5 })
        ));
    }

    #[test]
    fn test_password_exactly_minimum() {
        assert!(ClearTextPassword::new("12345678".to_string()).is_ok());
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(MAX_PASSWORD_BYTES + 1);
        let result = ClearTextPassword::new(long_password);
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_multibyte_counts_chars_for_minimum() {
        // 8 characters, 24 bytes
        assert!(ClearTextPassword::new("パスワード安全だ".to_string()).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = password.hash(TEST_COST).unwrap();

        assert!(hashed.as_hash_string().starts_with("$2b$04$"));
        assert!(hashed.verify(&password));

        let wrong = ClearTextPassword::candidate("WrongPassword123!".to_string());
        assert!(!hashed.verify(&wrong));
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let a = password.hash(TEST_COST).unwrap();
        let b = password.hash(TEST_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_stored_hash_roundtrip() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = password.hash(TEST_COST).unwrap();

        let restored = HashedPassword::from_stored(hashed.as_hash_string());
        assert!(restored.verify(&password));
    }

    #[test]
    fn test_candidate_past_bcrypt_limit_never_verifies() {
        let stored = "a".repeat(MAX_PASSWORD_BYTES);
        let password = ClearTextPassword::new(stored.clone()).unwrap();
        let hashed = password.hash(TEST_COST).unwrap();
        assert!(hashed.verify(&password));

        let extended = ClearTextPassword::candidate(format!("{stored}WRONG-SUFFIX"));
        assert!(!hashed.verify(&extended));
    }

    #[test]
    fn test_malformed_stored_hash_never_verifies() {
        let stored = HashedPassword::from_stored("garbage");
        let password = ClearTextPassword::candidate("anything".to_string());
        assert!(!stored.verify(&password));
    }

    #[test]
    fn test_matches_confirmation() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        assert!(password.matches("TestPassword123!"));
        assert!(!password.matches("TestPassword123"));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::candidate("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }
}
