// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

use std::sync::Arc;
use std::time::Duration;

use crate::auth::SessionTokens;
use crate::config::{AdminCredentials, AppConfig};
use crate::store::UserDirectory;

/// Shared, read-only request state.
///
/// Everything here is fixed at startup. The token issuer holds the only
/// copy of the signing secret; no request handler reads it from the
/// environment.
#[derive(Clone)]
pub struct AppState {
    /// Session token issuer/verifier.
    pub tokens: Arc<SessionTokens>,
    /// User directory (external collaborator).
    pub users: Arc<dyn UserDirectory>,
    /// Admin credentials, if configured.
    pub admin: Option<AdminCredentials>,
    /// Session cookie lifetime.
    pub session_ttl: Duration,
    /// Whether cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(tokens: SessionTokens, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            tokens: Arc::new(tokens),
            users,
            admin: None,
            session_ttl: crate::auth::session::DEFAULT_SESSION_TTL,
            cookie_secure: false,
        }
    }

    /// Apply configuration loaded at startup.
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.admin = config.admin.clone();
        self.session_ttl = config.session_ttl;
        self.cookie_secure = config.secure_cookies;
        self
    }

    #[cfg(test)]
    pub fn with_admin(mut self, admin: AdminCredentials) -> Self {
        self.admin = Some(admin);
        self
    }
}
