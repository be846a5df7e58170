// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

//! # Runtime Configuration
//!
//! Configuration is read from the environment exactly once at startup into
//! [`AppConfig`]. The signing secret is mandatory; everything else has a
//! default or is optional.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `SESSION_SECRET` | Symmetric secret for signing session tokens | Required |
//! | `SESSION_TTL` | Token lifetime, seconds or `<N>d` days | `7d` |
//! | `ADMIN_EMAIL` | Admin account email | Optional |
//! | `ADMIN_PASSWORD_HASH` | Argon2 PHC hash of the admin password | Optional |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `APP_ENV` | `production` enables the `Secure` cookie attribute | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `SEED_USER_EMAIL` | Seed a directory user at startup (dev only) | unset |
//! | `SEED_USER_PASSWORD` | Password for the seed user | unset |

use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::auth::session::parse_session_ttl;

/// Environment variable name for the token signing secret.
pub const SESSION_SECRET_ENV: &str = "SESSION_SECRET";

/// Environment variable name for the session token lifetime.
pub const SESSION_TTL_ENV: &str = "SESSION_TTL";

/// Environment variable name for the admin account email.
pub const ADMIN_EMAIL_ENV: &str = "ADMIN_EMAIL";

/// Environment variable name for the admin password hash (Argon2 PHC string).
pub const ADMIN_PASSWORD_HASH_ENV: &str = "ADMIN_PASSWORD_HASH";

/// Configuration errors. All variants are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No signing secret configured. Tokens cannot be issued or verified
    /// without one, so the process refuses to start.
    #[error("SESSION_SECRET is not set or empty")]
    MissingSecret,

    /// The bind address did not parse.
    #[error("invalid bind address: {0}")]
    InvalidBindAddr(String),
}

/// Admin credentials loaded from the environment.
///
/// When absent, the admin login endpoint rejects every attempt with the
/// same generic 401 it uses for a wrong password.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    /// Admin account email.
    pub email: String,
    /// Argon2 PHC hash of the admin password.
    pub password_hash: String,
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Symmetric secret for signing session tokens.
    pub session_secret: String,
    /// Session token lifetime.
    pub session_ttl: Duration,
    /// Admin credentials, if configured.
    pub admin: Option<AdminCredentials>,
    /// Server bind address.
    pub host: String,
    /// Server bind port.
    pub port: u16,
    /// Whether cookies carry the `Secure` attribute.
    pub secure_cookies: bool,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Fails with [`ConfigError::MissingSecret`] when no signing secret is
    /// configured. This is the startup-time invariant that lets the rest of
    /// the process treat the secret as always-present.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::build(
            env::var(SESSION_SECRET_ENV).ok(),
            env::var(SESSION_TTL_ENV).ok(),
            env::var(ADMIN_EMAIL_ENV).ok(),
            env::var(ADMIN_PASSWORD_HASH_ENV).ok(),
            env::var("HOST").ok(),
            env::var("PORT").ok(),
            env::var("APP_ENV").ok(),
        )
    }

    /// Build configuration from raw values. Split out from [`from_env`] so
    /// tests do not have to mutate process-wide environment state.
    ///
    /// [`from_env`]: AppConfig::from_env
    fn build(
        secret: Option<String>,
        ttl_raw: Option<String>,
        admin_email: Option<String>,
        admin_password_hash: Option<String>,
        host: Option<String>,
        port: Option<String>,
        app_env: Option<String>,
    ) -> Result<Self, ConfigError> {
        let session_secret = match secret {
            Some(s) if !s.trim().is_empty() => s,
            _ => return Err(ConfigError::MissingSecret),
        };

        let session_ttl = parse_session_ttl(ttl_raw.as_deref().unwrap_or("7d"));

        let admin = match (admin_email, admin_password_hash) {
            (Some(email), Some(password_hash)) => Some(AdminCredentials {
                email,
                password_hash,
            }),
            _ => None,
        };

        let host = host.unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = port
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .unwrap_or(8080);

        let secure_cookies = app_env.as_deref() == Some("production");

        Ok(Self {
            session_secret,
            session_ttl,
            admin,
            host,
            port,
            secure_cookies,
        })
    }

    /// The bind address string for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
