//! Opaque bearer token generation and hashing.
//!
//! Session and password-reset tokens are random 256-bit values handed to the
//! client once and stored only as HMAC-SHA256 hashes keyed by the server
//! signing secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Generates a new opaque token: 32 random bytes, hex-encoded.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_token() -> String {
    let mut buffer = [0u8; 32];
    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");
    hex::encode(buffer)
}

/// Hashes a raw token with HMAC-SHA256 using the server signing secret.
///
/// Returns a 64-character lowercase hex-encoded MAC. An attacker with
/// read-only access to the database cannot verify or forge tokens without
/// the server-side secret.
pub fn hash_token(token: &str, signing_secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
