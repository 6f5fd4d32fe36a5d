//! Value Object Module

pub mod email;
pub mod profile_text;
pub mod reset_token;
pub mod user_id;
pub mod user_password;
pub mod user_role;
