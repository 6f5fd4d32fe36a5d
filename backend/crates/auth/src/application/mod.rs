//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod forgot_password;
pub mod login;
pub mod profile;
pub mod register;
pub mod reset_password;
pub mod token_service;
pub mod user_admin;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::AuthConfig;
pub use forgot_password::{ForgotPasswordOutput, ForgotPasswordUseCase};
pub use login::{LoginInput, LoginUseCase};
pub use profile::ProfileUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use token_service::{AuthOutput, TokenIdentity, TokenService};
pub use user_admin::{CreateUserInput, UpdateUserInput, UserAdminUseCase};
