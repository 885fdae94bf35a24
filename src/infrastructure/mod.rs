//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`email`] - mailer implementations

pub mod email;
pub mod persistence;
