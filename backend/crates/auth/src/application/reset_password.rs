//! Reset Password Use Case
//!
//! The new hash is computed first, then the repository spends the token and
//! stores the hash as one unit, so concurrent resets with the same token
//! cannot both succeed and a failed password write leaves the token usable.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::PasswordResetRepository;
use crate::domain::value_object::{
    reset_token::ResetToken,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub const PASSWORD_UPDATED_MESSAGE: &str = "Password updated successfully.";

/// Reset password input
pub struct ResetPasswordInput {
    pub token: ResetToken,
    pub password: RawPassword,
}

/// Reset password use case
pub struct ResetPasswordUseCase<P>
where
    P: PasswordResetRepository,
{
    reset_repo: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<P> ResetPasswordUseCase<P>
where
    P: PasswordResetRepository,
{
    pub fn new(reset_repo: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self { reset_repo, config }
    }

    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<&'static str> {
        let password = UserPassword::hash(input.password, self.config.bcrypt_cost).await?;

        let user = self
            .reset_repo
            .reset_password(&input.token, &password)
            .await?
            .ok_or(AuthError::InvalidOrExpiredToken)?;

        tracing::info!(public_id = %user.public_id, "Password reset completed");

        Ok(PASSWORD_UPDATED_MESSAGE)
    }
}
