//! Link creation, retrieval, and slug allocation.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::slug::{DEFAULT_SLUG_LENGTH, MAX_SLUG_LENGTH, generate_slug, is_valid_slug};
use crate::utils::target_url::validate_target_url;

/// Default bound on slug generation retries.
///
/// With 36^8 possible slugs this is a defensive bound against pathological
/// collision patterns, not an expected-case limit.
pub const DEFAULT_MAX_SLUG_ATTEMPTS: u32 = 10;

/// Failure modes of slug allocation.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// User-supplied slug fails the character or length constraint.
    #[error(
        "Slug may only contain lowercase letters, digits, hyphens, and underscores (1-{MAX_SLUG_LENGTH} chars)"
    )]
    InvalidSlugFormat,
    /// User-supplied slug collides with an existing link of the same owner.
    #[error("You already have a link with this slug")]
    SlugAlreadyTaken,
    /// Generated-slug retries exhausted.
    #[error("Could not allocate a unique slug after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },
    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<AllocationError> for AppError {
    fn from(e: AllocationError) -> Self {
        match e {
            AllocationError::InvalidSlugFormat => AppError::bad_request(e.to_string(), json!({})),
            AllocationError::SlugAlreadyTaken => AppError::conflict(e.to_string(), json!({})),
            // Transient: the caller may retry the whole create operation.
            AllocationError::AllocationExhausted { attempts } => {
                AppError::internal(e.to_string(), json!({ "attempts": attempts }))
            }
            AllocationError::Store(inner) => inner,
        }
    }
}

/// Service for creating and retrieving short links.
///
/// Slug uniqueness is scoped per owner: two different users may hold the
/// same slug simultaneously. The composite unique index on `(user_id, slug)`
/// is the authoritative serialization point; in-process checks only shortcut
/// the common case.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    slug_length: usize,
    max_slug_attempts: u32,
}

impl LinkService {
    pub fn new(links: Arc<dyn LinkRepository>) -> Self {
        Self {
            links,
            slug_length: DEFAULT_SLUG_LENGTH,
            max_slug_attempts: DEFAULT_MAX_SLUG_ATTEMPTS,
        }
    }

    /// Overrides the generated slug length.
    pub fn with_slug_length(mut self, slug_length: usize) -> Self {
        self.slug_length = slug_length;
        self
    }

    /// Allocates a slug for an owner.
    ///
    /// If `requested` is given it is validated and checked for availability,
    /// then returned unchanged; no generation occurs. Otherwise random
    /// candidates are drawn until a free one is found, bounded by
    /// `max_slug_attempts`.
    ///
    /// The availability check races with concurrent creates; callers that
    /// insert afterwards must treat a unique violation as a collision (see
    /// [`LinkService::create_link`]).
    pub async fn allocate_slug(
        &self,
        user_id: i64,
        requested: Option<String>,
    ) -> Result<String, AllocationError> {
        match requested {
            Some(slug) => {
                if !is_valid_slug(&slug) {
                    return Err(AllocationError::InvalidSlugFormat);
                }
                if self.links.slug_exists(user_id, &slug).await? {
                    return Err(AllocationError::SlugAlreadyTaken);
                }
                Ok(slug)
            }
            None => {
                for _ in 0..self.max_slug_attempts {
                    let candidate = generate_slug(self.slug_length);
                    if !self.links.slug_exists(user_id, &candidate).await? {
                        return Ok(candidate);
                    }
                }
                Err(AllocationError::AllocationExhausted {
                    attempts: self.max_slug_attempts,
                })
            }
        }
    }

    /// Creates a short link, allocating a slug if none was requested.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an invalid target URL or slug format
    /// - [`AppError::Conflict`] if a requested slug is already taken
    /// - [`AppError::Internal`] if generated-slug retries are exhausted
    pub async fn create_link(
        &self,
        user_id: i64,
        target_url: String,
        requested_slug: Option<String>,
    ) -> Result<Link, AppError> {
        let target_url = validate_target_url(&target_url)?;
        let user_requested = requested_slug.is_some();

        let mut attempts_left = self.max_slug_attempts;
        loop {
            let slug = self.allocate_slug(user_id, requested_slug.clone()).await?;

            let new_link = NewLink {
                user_id,
                slug,
                target_url: target_url.clone(),
            };

            match self.links.create(new_link).await {
                Ok(link) => return Ok(link),
                // Lost the check-then-insert race: the unique index is the
                // authority, so a conflict is a collision.
                Err(AppError::Conflict { .. }) if user_requested => {
                    return Err(AllocationError::SlugAlreadyTaken.into());
                }
                Err(AppError::Conflict { .. }) => {
                    attempts_left = attempts_left.saturating_sub(1);
                    if attempts_left == 0 {
                        return Err(AllocationError::AllocationExhausted {
                            attempts: self.max_slug_attempts,
                        }
                        .into());
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Lists a user's links, most recent first.
    pub async fn list_links(&self, user_id: i64) -> Result<Vec<Link>, AppError> {
        self.links.list_for_user(user_id).await
    }

    /// Retrieves one of a user's links by slug.
    pub async fn get_link(&self, user_id: i64, slug: &str) -> Result<Link, AppError> {
        self.links
            .find_by_user_and_slug(user_id, slug)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "slug": slug })))
    }

    /// Resolves a public redirect path to its link.
    pub async fn resolve(&self, username: &str, slug: &str) -> Result<Link, AppError> {
        self.links
            .find_by_username_and_slug(username, slug)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Short link not found",
                    json!({ "username": username, "slug": slug }),
                )
            })
    }

    /// Deletes one of a user's links by slug.
    pub async fn delete_link(&self, user_id: i64, slug: &str) -> Result<(), AppError> {
        if !self.links.delete(user_id, slug).await? {
            return Err(AppError::not_found("Link not found", json!({ "slug": slug })));
        }
        Ok(())
    }

    /// Constructs the full public short URL for a link.
    pub fn short_url(&self, base_url: &str, username: &str, slug: &str) -> String {
        format!("{}/{}/{}", base_url.trim_end_matches('/'), username, slug)
    }
}
