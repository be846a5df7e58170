// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

//! User-directory contract.
//!
//! The platform's user records live in an external document database that
//! is out of scope here. The access-control layer consumes it through the
//! narrow [`UserDirectory`] trait; [`InMemoryDirectory`] is the
//! implementation used for local runs and tests.

use std::collections::HashMap;

/// A user record as the directory exposes it to this service.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Account email, the primary key. Stored as given; lookups are
    /// case-insensitive.
    pub email: String,
    /// Display name shown in the trimmed profile.
    pub display_name: String,
    /// Argon2 PHC hash of the account password.
    pub password_hash: String,
    /// Whether the account may host live sessions.
    pub is_streamer: bool,
    /// Whether the account has admin privileges.
    pub is_admin: bool,
    /// Whether the account's email address has been verified.
    pub email_verified: bool,
}

/// The directory operations the access-control layer needs.
pub trait UserDirectory: Send + Sync {
    /// Look up a user by email, case-insensitively.
    fn find_by_email(&self, email: &str) -> Option<UserRecord>;
}

/// In-memory directory keyed by lowercased email.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: HashMap<String, UserRecord>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user record.
    pub fn insert(&mut self, record: UserRecord) {
        self.users.insert(record.email.to_lowercase(), record);
    }
}

impl UserDirectory for InMemoryDirectory {
    fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        self.users.get(&email.to_lowercase()).cloned()
    }
}
