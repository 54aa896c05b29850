//! Password hashing and verification.
//!
//! Passwords are stored only as salted argon2id hashes in PHC string
//! format. Verification parses the stored string, so parameter upgrades
//! keep old hashes checkable.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::{error, warn};

use super::error::DomainError;

/// Derive a salted argon2id hash for storage.
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            error!(error = %err, "password hashing failed");
            DomainError::internal("failed to process password")
        })
}

/// Check a candidate password against a stored PHC hash string.
///
/// An unparseable stored hash counts as a mismatch rather than an error so
/// a corrupt row cannot be used to probe for its existence.
pub fn verify_password(stored_hash: &str, candidate: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(error = %err, "stored password hash is not a valid PHC string");
            return false;
        }
    };
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}
