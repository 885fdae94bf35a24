//! HTTP request handlers.

pub mod accounts;
pub mod health;
pub mod links;
pub mod redirect;
pub mod stats;

pub use accounts::{
    login_handler, logout_handler, me_handler, password_reset_confirm_handler,
    password_reset_request_handler, register_handler,
};
pub use health::health_handler;
pub use links::{create_link_handler, delete_link_handler, list_links_handler};
pub use redirect::redirect_handler;
pub use stats::link_stats_handler;
