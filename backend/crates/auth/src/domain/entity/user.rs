//! User Entity
//!
//! A registered account: credentials, profile and role.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::error::validation::ValidationErrors;

use crate::domain::value_object::{
    email::Email,
    profile_text::ProfileText,
    user_id::{UserId, UserPublicId},
    user_password::UserPassword,
    user_role::UserRole,
};

/// Optional extended profile
///
/// Mandatory at registration only when the deployment enables it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub user_name: Option<ProfileText>,
    pub gender: Option<ProfileText>,
    pub dob: Option<NaiveDate>,
    pub phone: Option<ProfileText>,
}

impl Profile {
    /// One error per absent field, in request order
    pub fn missing_fields(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.user_name.is_none() {
            errors.add("userName", "Username required");
        }
        if self.gender.is_none() {
            errors.add("gender", "Gender required");
        }
        if self.dob.is_none() {
            errors.add("dob", "Valid date of birth required");
        }
        if self.phone.is_none() {
            errors.add("phone", "Phone number required");
        }
        errors
    }
}

/// User entity as stored
#[derive(Debug, Clone)]
pub struct User {
    /// Surrogate key
    pub id: UserId,
    /// UUID exposed to clients
    pub public_id: UserPublicId,
    pub email: Email,
    /// Never leaves the service
    pub password: UserPassword,
    pub first_name: ProfileText,
    pub last_name: ProfileText,
    pub profile: Profile,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Apply a partial update in place
    ///
    /// Only present fields change; `updated_at` moves only when something did.
    pub fn apply(&mut self, changes: &UserChanges, now: DateTime<Utc>) {
        if changes.is_empty() {
            return;
        }
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
        if let Some(password) = &changes.password {
            self.password = password.clone();
        }
        if let Some(first_name) = &changes.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &changes.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
        if let Some(user_name) = &changes.user_name {
            self.profile.user_name = user_name.clone();
        }
        if let Some(gender) = &changes.gender {
            self.profile.gender = gender.clone();
        }
        if let Some(dob) = changes.dob {
            self.profile.dob = dob;
        }
        if let Some(phone) = &changes.phone {
            self.profile.phone = phone.clone();
        }
        self.updated_at = now;
    }
}

/// Insert payload for a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub public_id: UserPublicId,
    pub email: Email,
    pub password: UserPassword,
    pub first_name: ProfileText,
    pub last_name: ProfileText,
    pub profile: Profile,
    pub role: UserRole,
}

impl NewUser {
    /// Fresh public id, given role
    pub fn new(
        email: Email,
        password: UserPassword,
        first_name: ProfileText,
        last_name: ProfileText,
        profile: Profile,
        role: UserRole,
    ) -> Self {
        Self {
            public_id: UserPublicId::new(),
            email,
            password,
            first_name,
            last_name,
            profile,
            role,
        }
    }
}

/// Partial update
///
/// `None` leaves a column untouched. For nullable profile columns,
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<Email>,
    pub password: Option<UserPassword>,
    pub first_name: Option<ProfileText>,
    pub last_name: Option<ProfileText>,
    pub role: Option<UserRole>,
    pub user_name: Option<Option<ProfileText>>,
    pub gender: Option<Option<ProfileText>>,
    pub dob: Option<Option<NaiveDate>>,
    pub phone: Option<Option<ProfileText>>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.role.is_none()
            && self.user_name.is_none()
            && self.gender.is_none()
            && self.dob.is_none()
            && self.phone.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: UserId::new(1),
            public_id: UserPublicId::new(),
            email: Email::new("a@x.com").unwrap(),
            password: UserPassword::from_db("$2b$04$hash"),
            first_name: ProfileText::new("A").unwrap(),
            last_name: ProfileText::new("B").unwrap(),
            profile: Profile {
                phone: Some(ProfileText::new("555-0100").unwrap()),
                ..Profile::default()
            },
            role: UserRole::User,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_changes_leave_user_untouched() {
        let mut user = sample_user();
        let before = user.updated_at;
        user.apply(&UserChanges::default(), before + chrono::Duration::seconds(5));
        assert_eq!(user.updated_at, before);
    }

    #[test]
    fn test_apply_only_present_fields() {
        let mut user = sample_user();
        let changes = UserChanges {
            first_name: Some(ProfileText::new("Ada").unwrap()),
            ..UserChanges::default()
        };
        user.apply(&changes, Utc::now());
        assert_eq!(user.first_name.as_str(), "Ada");
        assert_eq!(user.last_name.as_str(), "B");
        assert_eq!(user.email.as_str(), "a@x.com");
        assert!(user.profile.phone.is_some());
    }

    #[test]
    fn test_explicit_null_clears_profile_field() {
        let mut user = sample_user();
        let changes = UserChanges {
            phone: Some(None),
            ..UserChanges::default()
        };
        user.apply(&changes, Utc::now());
        assert!(user.profile.phone.is_none());
    }

    #[test]
    fn test_profile_missing_fields() {
        assert_eq!(
            Profile::default().missing_fields().fields(),
            vec!["userName", "gender", "dob", "phone"]
        );
        let profile = Profile {
            user_name: Some(ProfileText::new("ada").unwrap()),
            gender: Some(ProfileText::new("female").unwrap()),
            dob: NaiveDate::from_ymd_opt(1990, 1, 2),
            phone: None,
        };
        assert_eq!(profile.missing_fields().fields(), vec!["phone"]);
    }
}
