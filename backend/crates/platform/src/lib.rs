//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (secure random tokens, Base64)
//! - Password hashing (bcrypt with zeroized clear text)

pub mod crypto;
pub mod password;
