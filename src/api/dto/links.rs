//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::Link;

/// Compiled regex for custom slug validation.
static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").unwrap());

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The target URL (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional custom slug; a random one is generated when omitted.
    #[validate(length(min = 1, max = 32))]
    #[validate(regex(path = "*SLUG_REGEX"))]
    pub slug: Option<String>,
}

/// A short link as returned by the API.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub slug: String,
    pub target_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    /// Builds the response, deriving the public short URL from the owner's
    /// username.
    pub fn from_link(link: Link, base_url: &str, username: &str) -> Self {
        let short_url = format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            username,
            link.slug
        );
        Self {
            slug: link.slug,
            target_url: link.target_url,
            short_url,
            created_at: link.created_at,
        }
    }
}

/// Response for listing a user's links.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub total: usize,
    pub links: Vec<LinkResponse>,
}
