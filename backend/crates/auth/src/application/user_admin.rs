//! User Administration Use Case
//!
//! Admin-only CRUD over user accounts.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, Profile, User, UserChanges};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    profile_text::ProfileText,
    user_id::UserPublicId,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Admin create input
pub struct CreateUserInput {
    pub email: Email,
    pub password: RawPassword,
    pub first_name: ProfileText,
    pub last_name: ProfileText,
    /// Defaults to the standard role
    pub role: Option<UserRole>,
    pub profile: Profile,
}

/// Admin partial update input
///
/// Nullable profile fields use `Some(None)` for an explicit clear.
#[derive(Default)]
pub struct UpdateUserInput {
    pub email: Option<Email>,
    pub password: Option<RawPassword>,
    pub first_name: Option<ProfileText>,
    pub last_name: Option<ProfileText>,
    pub role: Option<UserRole>,
    pub user_name: Option<Option<ProfileText>>,
    pub gender: Option<Option<ProfileText>>,
    pub dob: Option<Option<NaiveDate>>,
    pub phone: Option<Option<ProfileText>>,
}

pub struct UserAdminUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> UserAdminUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// All users, newest first
    pub async fn list(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list().await
    }

    pub async fn get(&self, public_id: &UserPublicId) -> AuthResult<User> {
        self.user_repo
            .find_by_public_id(public_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn create(&self, input: CreateUserInput) -> AuthResult<User> {
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
            input.role.unwrap_or_default(),
        );
        let user = self.user_repo.create(&new_user).await?;

        tracing::info!(public_id = %user.public_id, role = %user.role, "User created by admin");

        Ok(user)
    }

    /// Apply the present fields; an empty update returns the current record
    pub async fn update(
        &self,
        public_id: &UserPublicId,
        input: UpdateUserInput,
    ) -> AuthResult<User> {
        let user = self.get(public_id).await?;

        if let Some(email) = &input.email {
            if *email != user.email {
                let holder = self.user_repo.find_by_email(email).await?;
                if holder.is_some_and(|other| other.id != user.id) {
                    return Err(AuthError::EmailTaken);
                }
            }
        }

        let password = match input.password {
            Some(raw) => Some(UserPassword::hash(raw, self.config.bcrypt_cost).await?),
            None => None,
        };

        let changes = UserChanges {
            email: input.email,
            password,
            first_name: input.first_name,
            last_name: input.last_name,
            role: input.role,
            user_name: input.user_name,
            gender: input.gender,
            dob: input.dob,
            phone: input.phone,
        };

        if changes.is_empty() {
            return Ok(user);
        }

        let updated = self
            .user_repo
            .update(user.id, &changes)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(public_id = %updated.public_id, "User updated by admin");

        Ok(updated)
    }

    pub async fn delete(&self, public_id: &UserPublicId) -> AuthResult<()> {
        let user = self.get(public_id).await?;

        if !self.user_repo.delete(user.id).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(public_id = %user.public_id, "User deleted by admin");

        Ok(())
    }
}
