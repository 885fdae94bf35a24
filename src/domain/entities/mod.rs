//! Core business data structures.

pub mod click;
pub mod link;
pub mod user;

pub use click::{Click, NewClick, ReferrerCount};
pub use link::{Link, NewLink};
pub use user::{NewUser, User};
