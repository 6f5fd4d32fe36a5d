//! Profile Use Case

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserPublicId;
use crate::error::{AuthError, AuthResult};

pub struct ProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Current record of the authenticated user
    pub async fn execute(&self, public_id: &UserPublicId) -> AuthResult<User> {
        self.user_repo
            .find_by_public_id(public_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
