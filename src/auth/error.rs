// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
///
/// The three token-verification failures (`InvalidToken`, `Expired`,
/// `MalformedClaims`) are deliberately distinct: callers map each to a
/// different treat-as-unauthenticated outcome. Cryptographic and parsing
/// failures are never retried; they are terminal for the request.
#[derive(Debug)]
pub enum AuthError {
    /// No signing secret configured (startup-time failure).
    MissingSecret,
    /// No session cookie on the request.
    MissingSession,
    /// Token signature does not match, or the token names a different
    /// algorithm than the one the verifier pins.
    InvalidToken,
    /// Token is past its expiration claim.
    Expired,
    /// Token payload is missing a required claim field or has a wrong type.
    MalformedClaims,
    /// Credentials did not match. Generic on purpose; never says which
    /// field was wrong.
    InvalidCredentials,
    /// Unexpected internal error.
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingSecret => "missing_secret",
            AuthError::MissingSession => "missing_session",
            AuthError::InvalidToken => "invalid_token",
            AuthError::Expired => "token_expired",
            AuthError::MalformedClaims => "malformed_claims",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::Internal(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingSession
            | AuthError::InvalidToken
            | AuthError::Expired
            | AuthError::MalformedClaims
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::MissingSecret | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingSecret => write!(f, "No token signing secret is configured"),
            AuthError::MissingSession => write!(f, "No session cookie present"),
            AuthError::InvalidToken => write!(f, "Session token is invalid"),
            AuthError::Expired => write!(f, "Session token has expired"),
            AuthError::MalformedClaims => write!(f, "Session token claims are malformed"),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::Internal(msg) => write!(f, "Internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::Internal(ref msg) = self {
            tracing::error!(error = %msg, "internal authentication error");
        }
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            // Internal details stay in the logs; clients get the generic text.
            error: match self {
                AuthError::Internal(_) => "Internal error".to_string(),
                ref other => other.to_string(),
            },
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
