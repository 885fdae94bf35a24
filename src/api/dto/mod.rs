//! Data Transfer Objects for request/response serialization.

pub mod accounts;
pub mod health;
pub mod links;
pub mod stats;
