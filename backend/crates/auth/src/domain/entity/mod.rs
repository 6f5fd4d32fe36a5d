//! Entity Module

pub mod password_reset_token;
pub mod user;
