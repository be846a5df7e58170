// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

//! # API Data Models
//!
//! Request and response bodies for the REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation. Wire field names are camelCase to match the deployed
//! web client.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

// =============================================================================
// User login
// =============================================================================

/// Body of `POST /api/auth/login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Trimmed user profile returned on successful login.
///
/// Deliberately excludes the password hash and any internal fields.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    /// Account email.
    pub email: String,
    /// Display name.
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Whether the account may host live sessions.
    #[serde(rename = "isStreamer")]
    pub is_streamer: bool,
    /// Whether the account has admin privileges.
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

// =============================================================================
// Email verification status
// =============================================================================

/// Query parameters for `GET /api/auth/email-status`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct EmailStatusParams {
    /// Email address to check.
    pub email: String,
}

/// Response for `GET /api/auth/email-status`.
///
/// This is the authoritative verification check the onboarding pages call;
/// the access gate only checks that an `email` parameter is present.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmailStatusResponse {
    /// Email address that was checked.
    pub email: String,
    /// Whether the address has been verified.
    pub verified: bool,
}

// =============================================================================
// Admin endpoints
// =============================================================================

/// Body of `POST /api/admin/login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminLoginRequest {
    /// Admin email.
    pub email: String,
    /// Admin password.
    pub password: String,
}

/// Response for `POST /api/admin/login`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminLoginResponse {
    pub success: bool,
}

/// Response for `GET /api/admin/check`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminCheckResponse {
    /// Whether the admin flag cookie is present and valid.
    pub authenticated: bool,
    /// Set when an internal error forced the `false` fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response for `POST /api/admin/logout`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminLogoutResponse {
    pub success: bool,
}

// =============================================================================
// Input validation
// =============================================================================

/// Shape check for email addresses: one `@`, a non-empty local part, and a
/// domain with a dot. Well-formedness only; deliverability is not checked.
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@')
}

/// Validate login input before any credential lookup.
///
/// Returns a user-facing message for the 400 path.
pub fn validate_login_input(email: &str, password: &str) -> Result<(), String> {
    if !is_valid_email(email) {
        return Err("A valid email address is required".to_string());
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    Ok(())
}
