//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

/// Secret used by [`AuthConfig::development`]; never valid outside a dev build
const DEVELOPMENT_JWT_SECRET: &[u8] = b"development-only-jwt-secret-do-not-deploy";

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC key for HS256 token signing
    pub jwt_secret: Vec<u8>,
    /// Lifetime of issued tokens (1 hour)
    pub jwt_ttl: Duration,
    /// Lifetime of password reset tokens (15 minutes)
    pub reset_token_ttl: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Registration demands userName, gender, dob and phone
    pub require_extended_profile: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            jwt_ttl: Duration::from_secs(3600),
            reset_token_ttl: Duration::from_secs(15 * 60),
            bcrypt_cost: platform::password::DEFAULT_COST,
            require_extended_profile: false,
        }
    }
}

impl AuthConfig {
    /// Create config with the given signing secret
    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create config for development (fixed, publicly known secret)
    pub fn development() -> Self {
        Self::with_secret(DEVELOPMENT_JWT_SECRET)
    }

    /// Token TTL in whole seconds, saturating
    pub fn jwt_ttl_secs(&self) -> i64 {
        i64::try_from(self.jwt_ttl.as_secs()).unwrap_or(i64::MAX)
    }

    /// Reset token TTL as a chrono duration, saturating
    pub fn reset_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.reset_token_ttl).unwrap_or(chrono::Duration::MAX)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_ttl", &self.jwt_ttl)
            .field("reset_token_ttl", &self.reset_token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("require_extended_profile", &self.require_extended_profile)
            .finish()
    }
}
