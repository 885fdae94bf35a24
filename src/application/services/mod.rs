//! Business logic services for the application layer.

pub mod account_service;
pub mod link_service;
pub mod stats_service;

pub use account_service::AccountService;
pub use link_service::{AllocationError, LinkService};
pub use stats_service::{LinkStats, StatsService};
