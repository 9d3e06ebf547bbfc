//! Prefixed ID generation for account records
//!
//! Account IDs take the form `{prefix}_{random}` with at least 96 bits of
//! entropy, URL-safe so they can appear in links and query strings verbatim.

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};

/// Generate a prefixed ID with 96 bits of entropy
///
/// The random part is base64 URL-safe encoded without padding.
///
/// # Example
/// ```
/// use spotter_core::id::generate_prefixed_id;
///
/// let account_id = generate_prefixed_id("acc");
/// assert!(account_id.starts_with("acc_"));
/// ```
pub fn generate_prefixed_id(prefix: &str) -> String {
    // 12 bytes = 96 bits of random data
    let mut bytes = [0u8; 12];
    OsRng.try_fill_bytes(&mut bytes).unwrap();

    let encoded = BASE64_URL_SAFE_NO_PAD.encode(bytes);

    format!("{prefix}_{encoded}")
}

/// Validate that a prefixed ID has the expected format
///
/// Returns `true` only when the ID carries the expected prefix and a random
/// part that decodes to at least 96 bits.
pub fn validate_prefixed_id(id: &str, expected_prefix: &str) -> bool {
    if !id.starts_with(&format!("{expected_prefix}_")) {
        return false;
    }

    let random_part = &id[expected_prefix.len() + 1..];

    match BASE64_URL_SAFE_NO_PAD.decode(random_part) {
        Ok(decoded) => decoded.len() >= 12,
        Err(_) => false,
    }
}
