//! Application layer services implementing business logic.
//!
//! Services consume the domain repository traits and provide a clean API for
//! HTTP handlers and the task executor.
//!
//! - [`services::LinkService`] - link creation and slug allocation
//! - [`services::AccountService`] - accounts, sessions, password reset
//! - [`services::StatsService`] - click analytics

pub mod services;
