//! Authenticate Use Case
//!
//! Resolves a bearer token to the stored user it was issued for.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_service::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Verify `token` and load its subject
    ///
    /// A subject that no longer exists, or whose public id differs from the
    /// one in the token, is an invalid token.
    pub async fn execute(&self, token: &str) -> AuthResult<User> {
        let identity = TokenService::new(&self.config).verify(token)?;

        let user = self
            .user_repo
            .find_by_id(identity.user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if user.public_id != identity.public_id {
            return Err(AuthError::InvalidToken);
        }

        Ok(user)
    }
}
