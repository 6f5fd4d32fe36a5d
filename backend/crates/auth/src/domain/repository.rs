//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{
    password_reset_token::{NewPasswordResetToken, PasswordResetToken},
    user::{NewUser, User, UserChanges},
};
use crate::domain::value_object::{
    email::Email,
    reset_token::ResetToken,
    user_id::{UserId, UserPublicId},
    user_password::UserPassword,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user and return the stored row
    ///
    /// A duplicate email must surface as `AuthError::EmailTaken`.
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Find user by surrogate ID
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Find user by public ID
    async fn find_by_public_id(&self, public_id: &UserPublicId) -> AuthResult<Option<User>>;

    /// Find user by normalized email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// All users, newest first
    async fn list(&self) -> AuthResult<Vec<User>>;

    /// Persist only the present fields; `None` when the user does not exist
    async fn update(&self, user_id: UserId, changes: &UserChanges) -> AuthResult<Option<User>>;

    /// `false` when nothing was deleted
    async fn delete(&self, user_id: UserId) -> AuthResult<bool>;
}

/// Password reset token repository trait
#[trait_variant::make(PasswordResetRepository: Send)]
pub trait LocalPasswordResetRepository {
    /// Store a freshly issued token
    async fn create_reset_token(
        &self,
        token: &NewPasswordResetToken,
    ) -> AuthResult<PasswordResetToken>;

    /// Spend an unused, unexpired token and store its owner's new password
    ///
    /// Both writes commit together or not at all. Returns the updated owner,
    /// or `None` if the token was unknown, already used or expired. Of
    /// concurrent callers with the same token at most one gets `Some`. A token
    /// whose owner no longer exists yields `AuthError::UserNotFound` and stays
    /// unspent.
    async fn reset_password(
        &self,
        token: &ResetToken,
        password: &UserPassword,
    ) -> AuthResult<Option<User>>;
}
