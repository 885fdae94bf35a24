//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`mailer`] - Outbound email delivery contract
//! - [`tasks`] - Asynchronous delivery task runner
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; repository and mailer traits define contracts implemented in
//! [`crate::infrastructure`].

pub mod entities;
pub mod mailer;
pub mod repositories;
pub mod tasks;
