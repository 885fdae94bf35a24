//! Slug generation and validation utilities.
//!
//! Provides cryptographically secure random slug generation and character
//! validation for custom user-provided slugs.

/// Alphabet for generated slugs: 36 symbols, lowercase-only so slugs are
/// case-insensitive-safe in URLs.
pub const SLUG_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Default length of generated slugs. 36^8 possible values keeps per-user
/// collision probability negligible.
pub const DEFAULT_SLUG_LENGTH: usize = 8;

/// Maximum length accepted for user-supplied slugs.
pub const MAX_SLUG_LENGTH: usize = 32;

/// Generates a random slug of `length` characters from [`SLUG_ALPHABET`].
///
/// Uses `getrandom` for entropy: slugs must not be predictable from
/// previously issued ones, or an attacker could induce collisions on
/// purpose. Bytes are rejection-sampled so every symbol is drawn uniformly.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_slug(length: usize) -> String {
    // Largest multiple of the alphabet size below 256; bytes at or above it
    // are rejected to keep the draw uniform.
    const LIMIT: u8 = (256 / SLUG_ALPHABET.len() * SLUG_ALPHABET.len()) as u8;

    let mut slug = String::with_capacity(length);
    let mut buffer = [0u8; 64];

    while slug.len() < length {
        getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

        for &byte in &buffer {
            if slug.len() == length {
                break;
            }
            if byte < LIMIT {
                slug.push(SLUG_ALPHABET[byte as usize % SLUG_ALPHABET.len()] as char);
            }
        }
    }

    slug
}

/// Checks a user-supplied slug against the allowed character set.
///
/// # Rules
///
/// - Length: 1 to [`MAX_SLUG_LENGTH`] characters
/// - Allowed characters: lowercase letters, digits, hyphen, underscore
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > MAX_SLUG_LENGTH {
        return false;
    }

    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}
