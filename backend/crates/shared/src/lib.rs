//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Field-level validation errors reported at the HTTP boundary
//! - Typed surrogate and public identifiers
//! - Partial-update deserialization helpers
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    #[cfg(feature = "axum")]
    pub mod conversions;
    pub mod kind;
    pub mod validation;
}
#[cfg(feature = "axum")]
pub mod http;
pub mod id;
pub mod patch;
