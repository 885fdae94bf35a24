//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//!
//! - [`PgUserRepository`] - user accounts
//! - [`PgLinkRepository`] - short links
//! - [`PgClickRepository`] - click events and analytics queries
//! - [`PgSessionRepository`] - bearer session tokens
//! - [`PgResetTokenRepository`] - password reset tokens

pub mod pg_click_repository;
pub mod pg_link_repository;
pub mod pg_reset_token_repository;
pub mod pg_session_repository;
pub mod pg_user_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_reset_token_repository::PgResetTokenRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_user_repository::PgUserRepository;
