//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{
    password_reset_token::{NewPasswordResetToken, PasswordResetToken, PasswordResetTokenId},
    user::{NewUser, Profile, User, UserChanges},
};
use crate::domain::repository::{PasswordResetRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    profile_text::ProfileText,
    reset_token::ResetToken,
    user_id::{UserId, UserPublicId},
    user_password::UserPassword,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Unique constraint on `users.email` (see the users migration)
const USERS_EMAIL_UNIQUE: &str = "users_email_key";

const USER_COLUMNS: &str = "id, uuid, email, password_hash, first_name, last_name, \
     user_name, gender, dob, phone, role, created_at, updated_at";

const RESET_TOKEN_COLUMNS: &str = "id, user_id, token, expires_at, used, created_at";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A unique violation on the email index means another writer won the race
fn map_user_write_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() && db_err.constraint() == Some(USERS_EMAIL_UNIQUE) {
            return AuthError::EmailTaken;
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (
                uuid,
                email,
                password_hash,
                first_name,
                last_name,
                user_name,
                gender,
                dob,
                phone,
                role
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.public_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password.as_str())
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.profile.user_name.as_ref().map(ProfileText::as_str))
        .bind(user.profile.gender.as_ref().map(ProfileText::as_str))
        .bind(user.profile.dob)
        .bind(user.profile.phone.as_ref().map(ProfileText::as_str))
        .bind(user.role.code())
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_write_error)?;

        row.into_user()
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_public_id(&self, public_id: &UserPublicId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE uuid = $1"
        ))
        .bind(public_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn update(&self, user_id: UserId, changes: &UserChanges) -> AuthResult<Option<User>> {
        if changes.is_empty() {
            return self.find_by_id(user_id).await;
        }

        // SET list holds only the present fields
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE users SET ");
        let mut set = builder.separated(", ");
        if let Some(email) = &changes.email {
            set.push("email = ").push_bind_unseparated(email.as_str());
        }
        if let Some(password) = &changes.password {
            set.push("password_hash = ")
                .push_bind_unseparated(password.as_str());
        }
        if let Some(first_name) = &changes.first_name {
            set.push("first_name = ")
                .push_bind_unseparated(first_name.as_str());
        }
        if let Some(last_name) = &changes.last_name {
            set.push("last_name = ")
                .push_bind_unseparated(last_name.as_str());
        }
        if let Some(role) = changes.role {
            set.push("role = ").push_bind_unseparated(role.code());
        }
        if let Some(user_name) = &changes.user_name {
            set.push("user_name = ")
                .push_bind_unseparated(user_name.as_ref().map(ProfileText::as_str));
        }
        if let Some(gender) = &changes.gender {
            set.push("gender = ")
                .push_bind_unseparated(gender.as_ref().map(ProfileText::as_str));
        }
        if let Some(dob) = changes.dob {
            set.push("dob = ").push_bind_unseparated(dob);
        }
        if let Some(phone) = &changes.phone {
            set.push("phone = ")
                .push_bind_unseparated(phone.as_ref().map(ProfileText::as_str));
        }
        set.push("updated_at = NOW()");

        builder
            .push(" WHERE id = ")
            .push_bind(user_id.get())
            .push(" RETURNING ")
            .push(USER_COLUMNS);

        let row = builder
            .build_query_as::<UserRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_user_write_error)?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn delete(&self, user_id: UserId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Password Reset Repository Implementation
// ============================================================================

impl PasswordResetRepository for PgAuthRepository {
    async fn create_reset_token(
        &self,
        token: &NewPasswordResetToken,
    ) -> AuthResult<PasswordResetToken> {
        let row = sqlx::query_as::<_, ResetTokenRow>(&format!(
            r#"
            INSERT INTO password_reset_tokens (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            RETURNING {RESET_TOKEN_COLUMNS}
            "#
        ))
        .bind(token.user_id.get())
        .bind(token.token.as_str())
        .bind(token.expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_token())
    }

    async fn reset_password(
        &self,
        token: &ResetToken,
        password: &UserPassword,
    ) -> AuthResult<Option<User>> {
        let mut tx = self.pool.begin().await?;

        // Check and mark in one statement; row locking serializes racers
        let consumed = sqlx::query_as::<_, ResetTokenRow>(&format!(
            r#"
            UPDATE password_reset_tokens
            SET used = TRUE
            WHERE token = $1
              AND used = FALSE
              AND expires_at > NOW()
            RETURNING {RESET_TOKEN_COLUMNS}
            "#
        ))
        .bind(token.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(consumed) = consumed else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET password_hash = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(password.as_str())
        .bind(consumed.user_id)
        .fetch_optional(&mut *tx)
        .await?;

        // Dropping `tx` without commit rolls the token back to unused
        let user = row.ok_or(AuthError::UserNotFound)?.into_user()?;
        tx.commit().await?;

        Ok(Some(user))
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    uuid: Uuid,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    user_name: Option<String>,
    gender: Option<String>,
    dob: Option<NaiveDate>,
    phone: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Unknown role in store: {}", self.role)))?;

        Ok(User {
            id: UserId::new(self.id),
            public_id: UserPublicId::from_uuid(self.uuid),
            email: Email::from_db(self.email),
            password: UserPassword::from_db(self.password_hash),
            first_name: ProfileText::from_db(self.first_name),
            last_name: ProfileText::from_db(self.last_name),
            profile: Profile {
                user_name: self.user_name.map(ProfileText::from_db),
                gender: self.gender.map(ProfileText::from_db),
                dob: self.dob,
                phone: self.phone.map(ProfileText::from_db),
            },
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ResetTokenRow {
    id: i64,
    user_id: i64,
    token: String,
    expires_at: DateTime<Utc>,
    used: bool,
    created_at: DateTime<Utc>,
}

impl ResetTokenRow {
    fn into_token(self) -> PasswordResetToken {
        PasswordResetToken {
            id: PasswordResetTokenId::new(self.id),
            user_id: UserId::new(self.user_id),
            token: ResetToken::from_db(self.token),
            expires_at: self.expires_at,
            used: self.used,
            created_at: self.created_at,
        }
    }
}
