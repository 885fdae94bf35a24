//! Short link entity representing a per-user slug to URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL owned by a user.
///
/// The `(user_id, slug)` pair is unique across all links; the slug alone is
/// not. Two different users may hold the same slug simultaneously, which
/// bounds collision probability per user rather than across the whole system.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub user_id: i64,
    pub slug: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Public redirect path for this link, scoped under the owner's username.
    pub fn public_path(&self, username: &str) -> String {
        format!("/{}/{}", username, self.slug)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub user_id: i64,
    pub slug: String,
    pub target_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_path() {
        let link = Link {
            id: 7,
            user_id: 1,
            slug: "my-link".to_string(),
            target_url: "https://example.com".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(link.public_path("alice"), "/alice/my-link");
    }
}
