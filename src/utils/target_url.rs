//! Target URL validation for link creation.

use serde_json::json;
use url::Url;

use crate::error::AppError;

/// Maximum accepted length of a target URL.
pub const MAX_TARGET_URL_LENGTH: usize = 500;

/// Validates a link's target URL and returns it in parsed-normalized form.
///
/// Only absolute `http`/`https` URLs are accepted; anything else would let a
/// short link redirect into non-web schemes.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the URL fails to parse, has a
/// disallowed scheme, or exceeds [`MAX_TARGET_URL_LENGTH`].
pub fn validate_target_url(raw: &str) -> Result<String, AppError> {
    if raw.len() > MAX_TARGET_URL_LENGTH {
        return Err(AppError::bad_request(
            "Target URL is too long",
            json!({ "max_length": MAX_TARGET_URL_LENGTH, "provided_length": raw.len() }),
        ));
    }

    let parsed = Url::parse(raw).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AppError::bad_request(
            "Target URL must use http or https",
            json!({ "scheme": parsed.scheme() }),
        ));
    }

    Ok(parsed.into())
}
