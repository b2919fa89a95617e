//! ID and nonce generation utilities.
//!
//! Session ids are prefixed (`sess_…`) with at least 96 bits of entropy and
//! are URL-safe. CSRF state nonces are plain URL-safe random strings with at
//! least 128 bits of entropy.

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};

/// Generate a prefixed ID with at least 96 bits of entropy.
///
/// The ID format is: `{prefix}_{random_string}`
/// where the random string is base64 URL-safe encoded without padding.
pub fn generate_prefixed_id(prefix: &str) -> String {
    let mut bytes = [0u8; 12];
    OsRng.try_fill_bytes(&mut bytes).unwrap();

    let encoded = BASE64_URL_SAFE_NO_PAD.encode(bytes);

    format!("{prefix}_{encoded}")
}

/// Generate a random URL-safe string from `length` bytes of entropy.
///
/// # Panics
/// Panics if `length` is less than 16 (128 bits).
pub fn generate_random_string(length: usize) -> String {
    if length < 16 {
        panic!("Length must be at least 16");
    }
    let mut bytes = vec![0u8; length];
    OsRng.try_fill_bytes(&mut bytes).unwrap();
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

/// Validate that a prefixed ID has the expected format.
pub fn validate_prefixed_id(id: &str, expected_prefix: &str) -> bool {
    let Some(rest) = id.strip_prefix(expected_prefix) else {
        return false;
    };
    let Some(encoded) = rest.strip_prefix('_') else {
        return false;
    };

    match BASE64_URL_SAFE_NO_PAD.decode(encoded) {
        Ok(bytes) => bytes.len() >= 12,
        Err(_) => false,
    }
}
