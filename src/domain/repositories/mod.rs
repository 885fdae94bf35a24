//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete implementations
//! live in [`crate::infrastructure::persistence`]. Mock implementations are
//! auto-generated via `mockall` for unit tests.

pub mod click_repository;
pub mod link_repository;
pub mod reset_token_repository;
pub mod session_repository;
pub mod user_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;
pub use reset_token_repository::ResetTokenRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use reset_token_repository::MockResetTokenRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
