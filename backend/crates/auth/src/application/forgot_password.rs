//! Forgot Password Use Case
//!
//! Issues a single-use reset token. There is no mail channel, so the raw
//! token goes back in the response. Unknown emails get the generic message
//! and nothing is stored.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::password_reset_token::NewPasswordResetToken;
use crate::domain::repository::{PasswordResetRepository, UserRepository};
use crate::domain::value_object::{email::Email, reset_token::ResetToken};
use crate::error::AuthResult;

pub const UNKNOWN_EMAIL_MESSAGE: &str = "If the email exists, a reset token has been generated.";
pub const TOKEN_ISSUED_MESSAGE: &str = "Password reset token generated.";

/// Forgot password output
#[derive(Debug)]
pub struct ForgotPasswordOutput {
    pub message: &'static str,
    pub token: Option<ResetToken>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Forgot password use case
pub struct ForgotPasswordUseCase<U, P>
where
    U: UserRepository,
    P: PasswordResetRepository,
{
    user_repo: Arc<U>,
    reset_repo: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<U, P> ForgotPasswordUseCase<U, P>
where
    U: UserRepository,
    P: PasswordResetRepository,
{
    pub fn new(user_repo: Arc<U>, reset_repo: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            reset_repo,
            config,
        }
    }

    pub async fn execute(&self, email: Email) -> AuthResult<ForgotPasswordOutput> {
        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            return Ok(ForgotPasswordOutput {
                message: UNKNOWN_EMAIL_MESSAGE,
                token: None,
                expires_at: None,
            });
        };

        let new_token =
            NewPasswordResetToken::issue(user.id, Utc::now(), self.config.reset_token_ttl());
        let stored = self.reset_repo.create_reset_token(&new_token).await?;

        tracing::info!(
            public_id = %user.public_id,
            expires_at = %stored.expires_at,
            "Password reset token issued"
        );

        Ok(ForgotPasswordOutput {
            message: TOKEN_ISSUED_MESSAGE,
            token: Some(stored.token),
            expires_at: Some(stored.expires_at),
        })
    }
}
