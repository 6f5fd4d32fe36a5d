//! Password Reset Token Entity
//!
//! `used` only ever moves from false to true; a token is spent by its first
//! successful reset and is never reusable afterwards.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{SurrogateId, markers};

use crate::domain::value_object::{reset_token::ResetToken, user_id::UserId};

pub type PasswordResetTokenId = SurrogateId<markers::PasswordResetToken>;

#[derive(Debug, Clone)]
pub struct PasswordResetToken {
    pub id: PasswordResetTokenId,
    pub user_id: UserId,
    pub token: ResetToken,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    /// Unused and strictly before expiry
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.used && now < self.expires_at
    }
}

/// Insert payload
#[derive(Debug, Clone)]
pub struct NewPasswordResetToken {
    pub user_id: UserId,
    pub token: ResetToken,
    pub expires_at: DateTime<Utc>,
}

impl NewPasswordResetToken {
    /// Generate a fresh token for `user_id` valid for `ttl` from `now`
    pub fn issue(user_id: UserId, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id,
            token: ResetToken::generate(),
            expires_at: now + ttl,
        }
    }
}
