//! Register Use Case
//!
//! Creates a standard-role account and signs the new user in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_service::{AuthOutput, TokenService};
use crate::domain::entity::user::{NewUser, Profile};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    profile_text::ProfileText,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Register input (field-level validation already done)
pub struct RegisterInput {
    pub email: Email,
    pub password: RawPassword,
    pub confirm_password: String,
    pub first_name: ProfileText,
    pub last_name: ProfileText,
    pub profile: Profile,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<AuthOutput> {
        if !input.password.confirmed_by(&input.confirm_password) {
            return Err(AuthError::PasswordMismatch);
        }

        if self.config.require_extended_profile {
            input.profile.missing_fields().into_result()?;
        }

        // Fast path; the unique index still decides under concurrency
        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password = UserPassword::hash(input.password, self.config.bcrypt_cost).await?;

        let new_user = NewUser::new(
            input.email,
            password,
            input.first_name,
            input.last_name,
            input.profile,
            UserRole::User,
        );
        let user = self.user_repo.create(&new_user).await?;

        let token = TokenService::new(&self.config).issue(&user)?;

        tracing::info!(public_id = %user.public_id, "User registered");

        Ok(AuthOutput { user, token })
    }
}
