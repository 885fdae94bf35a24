//! Utility functions shared across the application.
//!
//! - [`slug`] - Slug generation and validation
//! - [`tokens`] - Opaque token generation and HMAC hashing
//! - [`password`] - Argon2id password hashing
//! - [`target_url`] - Target URL validation

pub mod password;
pub mod slug;
pub mod target_url;
pub mod tokens;
