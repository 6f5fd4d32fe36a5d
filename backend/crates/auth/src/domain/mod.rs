//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    password_reset_token::{NewPasswordResetToken, PasswordResetToken},
    user::{NewUser, Profile, User, UserChanges},
};
pub use repository::{PasswordResetRepository, UserRepository};
