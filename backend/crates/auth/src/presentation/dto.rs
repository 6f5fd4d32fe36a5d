//! API DTOs (Data Transfer Objects)
//!
//! Requests deserialize leniently (missing strings become empty) and are then
//! validated in one pass, so a client sees every failing field at once.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::error::validation::ValidationErrors;
use platform::password::PasswordPolicyError;
use serde::{Deserialize, Serialize};

use crate::application::{
    CreateUserInput, ForgotPasswordOutput, LoginInput, RegisterInput, ResetPasswordInput,
    UpdateUserInput,
};
use crate::domain::entity::user::{Profile, User};
use crate::domain::value_object::{
    email::Email,
    profile_text::{PHONE_MAX_LENGTH, PROFILE_TEXT_MAX_LENGTH, ProfileText, ProfileTextError},
    reset_token::ResetToken,
    user_id::UserPublicId,
    user_password::RawPassword,
    user_role::UserRole,
};

// ============================================================================
// Field validation helpers
// ============================================================================

fn email(errors: &mut ValidationErrors, raw: &str) -> Option<Email> {
    errors.check("email", Email::new(raw))
}

fn new_password(errors: &mut ValidationErrors, field: &'static str, raw: String) -> Option<RawPassword> {
    errors.check(
        field,
        RawPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => {
                format!("Password must be at least {min} characters")
            }
            PasswordPolicyError::TooLong { max, .. } => {
                format!("Password must be at most {max} bytes")
            }
        }),
    )
}

fn text(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: &str,
    max: usize,
    empty_message: &str,
) -> Option<ProfileText> {
    errors.check(
        field,
        ProfileText::with_max(raw, max).map_err(|e| match e {
            ProfileTextError::Empty => empty_message.to_string(),
            ProfileTextError::TooLong { .. } => format!("{field} {e}"),
        }),
    )
}

fn role(errors: &mut ValidationErrors, raw: &str) -> Option<UserRole> {
    errors.check("role", raw.parse::<UserRole>())
}

/// ISO-8601 calendar date, or a full timestamp whose date part is taken
fn dob(errors: &mut ValidationErrors, raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let parsed = raw
        .parse::<NaiveDate>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()));
    if parsed.is_none() {
        errors.add("dob", "Valid date of birth required");
    }
    parsed
}

/// Parse a path id
pub fn user_public_id(raw: &str) -> Result<UserPublicId, ValidationErrors> {
    UserPublicId::parse_str(raw).map_err(|_| ValidationErrors::single("uuid", "Valid uuid required"))
}

/// Extended profile fields as submitted on create
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
    pub user_name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub phone: Option<String>,
}

impl ProfileFields {
    fn validate(self, errors: &mut ValidationErrors) -> Profile {
        Profile {
            user_name: self.user_name.and_then(|v| {
                text(errors, "userName", &v, PROFILE_TEXT_MAX_LENGTH, "Username required")
            }),
            gender: self
                .gender
                .and_then(|v| text(errors, "gender", &v, PROFILE_TEXT_MAX_LENGTH, "Gender required")),
            dob: self.dob.and_then(|v| dob(errors, &v)),
            phone: self
                .phone
                .and_then(|v| text(errors, "phone", &v, PHONE_MAX_LENGTH, "Phone number required")),
        }
    }
}

// ============================================================================
// Register / Login
// ============================================================================

/// Register request
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(flatten)]
    pub profile: ProfileFields,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<RegisterInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = email(&mut errors, &self.email);
        let password = new_password(&mut errors, "password", self.password);
        let first_name = text(
            &mut errors,
            "firstName",
            &self.first_name,
            PROFILE_TEXT_MAX_LENGTH,
            "First name required",
        );
        let last_name = text(
            &mut errors,
            "lastName",
            &self.last_name,
            PROFILE_TEXT_MAX_LENGTH,
            "Last name required",
        );
        let profile = self.profile.validate(&mut errors);

        match (email, password, first_name, last_name) {
            (Some(email), Some(password), Some(first_name), Some(last_name)) if errors.is_empty() => {
                Ok(RegisterInput {
                    email,
                    password,
                    confirm_password: self.confirm_password,
                    first_name,
                    last_name,
                    profile,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Login request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(self) -> Result<LoginInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = email(&mut errors, &self.email);
        if self.password.is_empty() {
            errors.add("password", "Password required");
        }

        match email {
            Some(email) if errors.is_empty() => Ok(LoginInput {
                email,
                password: RawPassword::candidate(self.password),
            }),
            _ => Err(errors),
        }
    }
}

// ============================================================================
// Forgot / Reset Password
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ForgotPasswordRequest {
    pub fn validate(self) -> Result<Email, ValidationErrors> {
        Email::new(&self.email).map_err(|e| ValidationErrors::single("email", e.to_string()))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

impl ResetPasswordRequest {
    pub fn validate(self) -> Result<ResetPasswordInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let token = ResetToken::parse(&self.token);
        if token.is_none() {
            errors.add("token", "Reset token required");
        }
        let password = new_password(&mut errors, "password", self.password);

        match (token, password) {
            (Some(token), Some(password)) => Ok(ResetPasswordInput { token, password }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<ForgotPasswordOutput> for ForgotPasswordResponse {
    fn from(output: ForgotPasswordOutput) -> Self {
        Self {
            message: output.message,
            token: output.token.map(|t| t.as_str().to_string()),
            expires_at: output.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ============================================================================
// User administration
// ============================================================================

/// Admin create request
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    #[serde(flatten)]
    pub profile: ProfileFields,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<CreateUserInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = email(&mut errors, &self.email);
        let password = new_password(&mut errors, "password", self.password);
        let first_name = text(
            &mut errors,
            "firstName",
            &self.first_name,
            PROFILE_TEXT_MAX_LENGTH,
            "First name required",
        );
        let last_name = text(
            &mut errors,
            "lastName",
            &self.last_name,
            PROFILE_TEXT_MAX_LENGTH,
            "Last name required",
        );
        let role = self.role.and_then(|r| role(&mut errors, &r));
        let profile = self.profile.validate(&mut errors);

        match (email, password, first_name, last_name) {
            (Some(email), Some(password), Some(first_name), Some(last_name)) if errors.is_empty() => {
                Ok(CreateUserInput {
                    email,
                    password,
                    first_name,
                    last_name,
                    role,
                    profile,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Admin partial update request
///
/// `null` on a non-nullable field is the same as leaving it out; on a
/// profile field it clears the value.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    #[serde(deserialize_with = "kernel::patch::deserialize_some")]
    pub user_name: Option<Option<String>>,
    #[serde(deserialize_with = "kernel::patch::deserialize_some")]
    pub gender: Option<Option<String>>,
    #[serde(deserialize_with = "kernel::patch::deserialize_some")]
    pub dob: Option<Option<String>>,
    #[serde(deserialize_with = "kernel::patch::deserialize_some")]
    pub phone: Option<Option<String>>,
}

impl UpdateUserRequest {
    pub fn validate(self) -> Result<UpdateUserInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let max = PROFILE_TEXT_MAX_LENGTH;

        let input = UpdateUserInput {
            email: self.email.and_then(|v| email(&mut errors, &v)),
            password: self
                .password
                .and_then(|v| new_password(&mut errors, "password", v)),
            first_name: self.first_name.and_then(|v| {
                text(&mut errors, "firstName", &v, max, "First name cannot be empty")
            }),
            last_name: self.last_name.and_then(|v| {
                text(&mut errors, "lastName", &v, max, "Last name cannot be empty")
            }),
            role: self.role.and_then(|v| role(&mut errors, &v)),
            user_name: patch_text(&mut errors, "userName", self.user_name, max, "Username cannot be empty"),
            gender: patch_text(&mut errors, "gender", self.gender, max, "Gender cannot be empty"),
            dob: match self.dob {
                None => None,
                Some(None) => Some(None),
                Some(Some(v)) => dob(&mut errors, &v).map(Some),
            },
            phone: patch_text(
                &mut errors,
                "phone",
                self.phone,
                PHONE_MAX_LENGTH,
                "Phone number cannot be empty",
            ),
        };

        errors.into_result().map(|()| input)
    }
}

fn patch_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<Option<String>>,
    max: usize,
    empty_message: &str,
) -> Option<Option<ProfileText>> {
    match value {
        None => None,
        Some(None) => Some(None),
        Some(Some(v)) => text(errors, field, &v, max, empty_message).map(Some),
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Client-facing user (password hash and surrogate id never included)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub uuid: UserPublicId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub phone: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            uuid: user.public_id,
            email: user.email.as_str().to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            user_name: user.profile.user_name.as_ref().map(|v| v.as_str().to_string()),
            gender: user.profile.gender.as_ref().map(|v| v.as_str().to_string()),
            dob: user.profile.dob,
            phone: user.profile.phone.as_ref().map(|v| v.as_str().to_string()),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// `{user, token}` returned by register and login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_json(json: &str) -> Result<RegisterInput, ValidationErrors> {
        serde_json::from_str::<RegisterRequest>(json).unwrap().validate()
    }

    #[test]
    fn test_register_collects_every_failing_field() {
        let errors = register_json(r#"{"email":"nope","password":"short"}"#)
            .err()
            .unwrap();
        assert_eq!(
            errors.fields(),
            vec!["email", "password", "firstName", "lastName"]
        );
    }

    #[test]
    fn test_register_valid() {
        let input = register_json(
            r#"{"email":" A@X.com ","password":"longenough1","confirmPassword":"longenough1",
                "firstName":"A","lastName":"B","dob":"1990-04-01"}"#,
        )
        .unwrap();
        assert_eq!(input.email.as_str(), "a@x.com");
        assert_eq!(input.profile.dob, NaiveDate::from_ymd_opt(1990, 4, 1));
        assert!(input.profile.user_name.is_none());
    }

    #[test]
    fn test_register_bad_dob() {
        let errors = register_json(
            r#"{"email":"a@x.com","password":"longenough1","confirmPassword":"longenough1",
                "firstName":"A","lastName":"B","dob":"yesterday"}"#,
        )
        .err()
        .unwrap();
        assert_eq!(errors.fields(), vec!["dob"]);
        assert_eq!(errors.errors()[0].message, "Valid date of birth required");
    }

    #[test]
    fn test_dob_accepts_timestamp() {
        let mut errors = ValidationErrors::new();
        assert_eq!(
            dob(&mut errors, "1990-04-01T00:00:00Z"),
            NaiveDate::from_ymd_opt(1990, 4, 1)
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_login_requires_password() {
        let errors = serde_json::from_str::<LoginRequest>(r#"{"email":"a@x.com"}"#)
            .unwrap()
            .validate()
            .err()
            .unwrap();
        assert_eq!(errors.fields(), vec!["password"]);
    }

    #[test]
    fn test_create_user_invalid_role() {
        let errors = serde_json::from_str::<CreateUserRequest>(
            r#"{"email":"a@x.com","password":"longenough1","firstName":"A","lastName":"B","role":"root"}"#,
        )
        .unwrap()
        .validate()
        .err()
        .unwrap();
        assert_eq!(errors.fields(), vec!["role"]);
        assert_eq!(errors.errors()[0].message, "Invalid role");
    }

    #[test]
    fn test_update_distinguishes_absent_and_null() {
        let input = serde_json::from_str::<UpdateUserRequest>(r#"{"phone":null,"firstName":"Ada"}"#)
            .unwrap()
            .validate()
            .unwrap();
        assert!(matches!(input.phone, Some(None)));
        assert!(input.gender.is_none());
        assert_eq!(input.first_name.unwrap().as_str(), "Ada");
        assert!(input.email.is_none());
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let errors = serde_json::from_str::<UpdateUserRequest>(r#"{"lastName":"  "}"#)
            .unwrap()
            .validate()
            .err()
            .unwrap();
        assert_eq!(errors.errors()[0].message, "Last name cannot be empty");
    }

    #[test]
    fn test_path_id() {
        assert!(user_public_id("not-a-uuid").is_err());
        assert!(user_public_id(&uuid::Uuid::new_v4().to_string()).is_ok());
    }

    #[test]
    fn test_forgot_response_omits_absent_token() {
        let json = serde_json::to_value(ForgotPasswordResponse {
            message: "m",
            token: None,
            expires_at: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"message": "m"}));
    }
}
