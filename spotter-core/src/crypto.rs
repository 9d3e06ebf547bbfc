//! Password hashing and verification
//!
//! This module wraps bcrypt behind the two operations the workflows need:
//! one-way hashing at registration time and comparison at login time.
//!
//! # Security
//!
//! Hashes carry a per-call random salt, so hashing the same password twice
//! yields different strings. Verification recomputes the hash under the
//! stored salt and compares in constant time, so it does not leak how many
//! leading characters of a guess were correct. A stored value that is not a
//! well-formed bcrypt hash fails verification rather than raising an error.

use crate::error::{AuthError, Error};

/// bcrypt work factor for interactive logins.
pub const PASSWORD_HASH_COST: u32 = 12;

/// Hash a plaintext password for storage.
///
/// Fails only on catastrophic environment error (OS entropy source
/// unavailable), which surfaces as [`AuthError::PasswordHash`].
pub fn hash_password(password: &str) -> Result<String, Error> {
    bcrypt::hash(password, PASSWORD_HASH_COST)
        .map_err(|e| AuthError::PasswordHash(e.to_string()).into())
}

/// Compare a plaintext password against a stored hash.
///
/// Returns `false` for a mismatch and for any malformed stored hash. Callers
/// never need to distinguish the two.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    bcrypt::verify(password, stored_hash).unwrap_or(false)
}
