// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

//! Slow password comparison.
//!
//! Credentials are compared with Argon2id. Both a hash-parse failure and a
//! mismatch collapse into the same generic [`AuthError::InvalidCredentials`]
//! so a caller cannot learn which part was wrong.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use super::AuthError;

/// Compare a candidate password against a stored Argon2 PHC hash.
pub fn verify_password(candidate: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Hash a password into an Argon2 PHC string.
///
/// Used for provisioning accounts and for seeding the in-memory directory;
/// verification never re-hashes.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("password hashing failed: {e}")))
}
