//! Login Use Case
//!
//! Unknown email and wrong password are the same failure.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_service::{AuthOutput, TokenService};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: Email,
    pub password: RawPassword,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<AuthOutput> {
        let user = self
            .user_repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.password.verify(input.password).await {
            return Err(AuthError::InvalidCredentials);
        }

        let token = TokenService::new(&self.config).issue(&user)?;

        tracing::info!(public_id = %user.public_id, "User logged in");

        Ok(AuthOutput { user, token })
    }
}
