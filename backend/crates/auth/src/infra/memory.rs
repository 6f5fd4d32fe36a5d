//! In-Memory Repository Implementation
//!
//! Same contract as [`PgAuthRepository`](super::postgres::PgAuthRepository),
//! held behind one mutex: uniqueness checks and token consumption are atomic
//! because every operation runs under the lock. Used by tests and by other
//! crates' router tests that need an auth gate.

use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entity::{
    password_reset_token::{NewPasswordResetToken, PasswordResetToken, PasswordResetTokenId},
    user::{NewUser, User, UserChanges},
};
use crate::domain::repository::{PasswordResetRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    reset_token::ResetToken,
    user_id::{UserId, UserPublicId},
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Store {
    users: Vec<User>,
    reset_tokens: Vec<PasswordResetToken>,
    next_user_id: i64,
    next_token_id: i64,
}

#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AuthResult<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| AuthError::Internal("In-memory store poisoned".to_string()))
    }

    /// Snapshot of every stored reset token
    pub fn reset_tokens(&self) -> AuthResult<Vec<PasswordResetToken>> {
        Ok(self.lock()?.reset_tokens.clone())
    }

    /// Overwrite a stored token's expiry (for exercising expiry paths)
    pub fn set_reset_token_expiry(
        &self,
        token: &ResetToken,
        expires_at: chrono::DateTime<Utc>,
    ) -> AuthResult<bool> {
        let mut store = self.lock()?;
        match store.reset_tokens.iter_mut().find(|t| &t.token == token) {
            Some(stored) => {
                stored.expires_at = expires_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, new_user: &NewUser) -> AuthResult<User> {
        let mut store = self.lock()?;
        if store.users.iter().any(|u| u.email == new_user.email) {
            return Err(AuthError::EmailTaken);
        }

        store.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: UserId::new(store.next_user_id),
            public_id: new_user.public_id,
            email: new_user.email.clone(),
            password: new_user.password.clone(),
            first_name: new_user.first_name.clone(),
            last_name: new_user.last_name.clone(),
            profile: new_user.profile.clone(),
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };
        store.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        Ok(self.lock()?.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_by_public_id(&self, public_id: &UserPublicId) -> AuthResult<Option<User>> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|u| &u.public_id == public_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.lock()?.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let mut users = self.lock()?.users.clone();
        users.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.get().cmp(&a.id.get()))
        });
        Ok(users)
    }

    async fn update(&self, user_id: UserId, changes: &UserChanges) -> AuthResult<Option<User>> {
        let mut store = self.lock()?;

        if let Some(email) = &changes.email {
            if store.users.iter().any(|u| u.id != user_id && &u.email == email) {
                return Err(AuthError::EmailTaken);
            }
        }

        Ok(store
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .map(|user| {
                user.apply(changes, Utc::now());
                user.clone()
            }))
    }

    async fn delete(&self, user_id: UserId) -> AuthResult<bool> {
        let mut store = self.lock()?;
        let before = store.users.len();
        store.users.retain(|u| u.id != user_id);
        let deleted = store.users.len() != before;
        if deleted {
            // ON DELETE CASCADE
            store.reset_tokens.retain(|t| t.user_id != user_id);
        }
        Ok(deleted)
    }
}

impl PasswordResetRepository for InMemoryAuthRepository {
    async fn create_reset_token(
        &self,
        token: &NewPasswordResetToken,
    ) -> AuthResult<PasswordResetToken> {
        let mut store = self.lock()?;
        store.next_token_id += 1;
        let stored = PasswordResetToken {
            id: PasswordResetTokenId::new(store.next_token_id),
            user_id: token.user_id,
            token: token.token.clone(),
            expires_at: token.expires_at,
            used: false,
            created_at: Utc::now(),
        };
        store.reset_tokens.push(stored.clone());
        Ok(stored)
    }

    async fn reset_password(
        &self,
        token: &ResetToken,
        password: &UserPassword,
    ) -> AuthResult<Option<User>> {
        let mut store = self.lock()?;
        let now = Utc::now();
        let Some(token_idx) = store
            .reset_tokens
            .iter()
            .position(|t| &t.token == token && t.is_usable(now))
        else {
            return Ok(None);
        };

        let owner = store.reset_tokens[token_idx].user_id;
        let user = store
            .users
            .iter_mut()
            .find(|u| u.id == owner)
            .ok_or(AuthError::UserNotFound)?;
        let changes = UserChanges {
            password: Some(password.clone()),
            ..UserChanges::default()
        };
        user.apply(&changes, now);
        let user = user.clone();

        store.reset_tokens[token_idx].used = true;
        Ok(Some(user))
    }
}
