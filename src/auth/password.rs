//! Password hashing and verification.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hashes a password using Argon2id with default parameters.
///
/// The returned hash is in PHC string format and includes the salt and hashing parameters.
pub fn hash_password(password: &str) -> crate::Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Verifies a password against a hash generated by [`hash_password`].
///
/// Returns `Ok(false)` if the password does not match; an error is only returned if the hash
/// itself cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> crate::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
