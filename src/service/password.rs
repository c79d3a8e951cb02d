//! Password hashing and verification using Argon2id

use crate::error::LeagueError;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::collections::HashMap;

/// Hash a password into a PHC string suitable for the `users` table.
pub fn hash_password(password: &str) -> Result<String, LeagueError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC hash. Malformed hashes never verify.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Whether `username` exists in `credentials` and `password` matches its hash.
pub fn valid_credentials(
    credentials: &HashMap<String, String>,
    username: &str,
    password: &str,
) -> bool {
    credentials
        .get(username)
        .is_some_and(|hash| verify_password(password, hash))
}
