// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

//! User session endpoints.

use axum::{
    extract::{Query, State},
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse},
    Json,
};

use crate::{
    auth::{password::verify_password, AuthError, SessionIdentity, SESSION_COOKIE},
    cookies::{CookieMap, SetCookie},
    error::ApiError,
    models::{
        validate_login_input, EmailStatusParams, EmailStatusResponse, LoginRequest,
        ProfileResponse,
    },
    state::AppState,
};

/// Log a user in and set the session cookie.
///
/// Input is validated before any credential lookup. The three failure
/// statuses are distinct on purpose: 400 for malformed input, 404 for an
/// unknown user, 401 for a wrong password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = ProfileResponse),
        (status = 400, description = "Malformed email or too-short password"),
        (status = 404, description = "No account for this email"),
        (status = 401, description = "Wrong password"),
        (status = 500, description = "Internal error")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_login_input(&request.email, &request.password).map_err(ApiError::bad_request)?;

    let user = state
        .users
        .find_by_email(&request.email)
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    verify_password(&request.password, &user.password_hash)
        .map_err(|_| ApiError::unauthorized("Invalid credentials"))?;

    let identity = SessionIdentity {
        email: user.email.clone(),
        is_streamer: user.is_streamer,
        is_admin: user.is_admin,
    };
    let token = state
        .tokens
        .issue(&identity, state.session_ttl)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let cookie = SetCookie::new(SESSION_COOKIE, token)
        .secure(state.cookie_secure)
        .max_age(state.session_ttl.as_secs() as i64)
        .to_header_value()
        .ok_or_else(|| ApiError::internal("session cookie could not be rendered"))?;

    tracing::info!(email = %user.email, "user logged in");

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(ProfileResponse {
            email: user.email,
            display_name: user.display_name,
            is_streamer: user.is_streamer,
            is_admin: user.is_admin,
        }),
    ))
}

/// Return the claims asserted by the session cookie.
///
/// Downstream page logic trusts this instead of re-deriving cookie state.
/// Each verification failure surfaces as its own 401 error code.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current session claims", body = crate::auth::SessionClaims),
        (status = 401, description = "Missing, invalid, expired, or malformed session token")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<crate::auth::SessionClaims>, AuthError> {
    let cookies = CookieMap::from_headers(&headers);
    let token = cookies.get(SESSION_COOKIE).ok_or(AuthError::MissingSession)?;
    let claims = state.tokens.verify(token)?;
    Ok(Json(claims))
}

/// Report whether an email address has been verified.
///
/// The access gate only checks that onboarding requests carry an `email`
/// parameter; this endpoint is the authoritative check the pages call.
/// Unknown addresses report `verified: false` rather than erroring, so the
/// endpoint does not enumerate accounts.
#[utoipa::path(
    get,
    path = "/api/auth/email-status",
    tag = "Auth",
    params(EmailStatusParams),
    responses(
        (status = 200, description = "Verification status", body = EmailStatusResponse)
    )
)]
pub async fn email_status(
    State(state): State<AppState>,
    Query(params): Query<EmailStatusParams>,
) -> Json<EmailStatusResponse> {
    let verified = state
        .users
        .find_by_email(&params.email)
        .map(|user| user.email_verified)
        .unwrap_or(false);

    Json(EmailStatusResponse {
        email: params.email,
        verified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::auth::SessionTokens;
    use crate::store::{InMemoryDirectory, UserRecord};
    use axum::http::StatusCode;
    use std::sync::Arc;
    use std::time::Duration;

    const PASSWORD: &str = "sweat-every-day";

    fn test_state() -> AppState {
        let mut directory = InMemoryDirectory::new();
        directory.insert(UserRecord {
            email: "jo@fitlive.tv".to_string(),
            display_name: "Jo".to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            is_streamer: true,
            is_admin: false,
            email_verified: true,
        });
        directory.insert(UserRecord {
            email: "new@fitlive.tv".to_string(),
            display_name: "New".to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            is_streamer: false,
            is_admin: false,
            email_verified: false,
        });

        AppState::new(
            SessionTokens::new("test-secret").unwrap(),
            Arc::new(directory),
        )
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn login_rejects_malformed_input() {
        let state = test_state();

        let err = login(State(state.clone()), Json(login_request("not-an-email", PASSWORD)))
            .await
            .err()
            .unwrap();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = login(State(state), Json(login_request("jo@fitlive.tv", "short")))
            .await
            .err()
            .unwrap();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_unknown_user_is_404() {
        let err = login(
            State(test_state()),
            Json(login_request("nobody@fitlive.tv", PASSWORD)),
        )
        .await
        .err()
        .unwrap();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn login_wrong_password_is_401() {
        let err = login(
            State(test_state()),
            Json(login_request("jo@fitlive.tv", "wrong-password")),
        )
        .await
        .err()
        .unwrap();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Invalid credentials");
    }

    #[tokio::test]
    async fn login_sets_session_cookie_and_returns_profile() {
        let response = login(
            State(test_state()),
            Json(login_request("jo@fitlive.tv", PASSWORD)),
        )
        .await
        .unwrap()
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("token="));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("Max-Age=604800"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let profile: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(profile["email"], "jo@fitlive.tv");
        assert_eq!(profile["isStreamer"], true);
        assert!(profile.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn me_requires_session_cookie() {
        let result = me(State(test_state()), HeaderMap::new()).await;
        assert!(matches!(result, Err(AuthError::MissingSession)));
    }

    #[tokio::test]
    async fn me_returns_claims_from_valid_cookie() {
        let state = test_state();
        let token = state
            .tokens
            .issue(
                &SessionIdentity {
                    email: "jo@fitlive.tv".to_string(),
                    is_streamer: true,
                    is_admin: false,
                },
                Duration::from_secs(60),
            )
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            format!("token={token}").parse().unwrap(),
        );

        let Json(claims) = me(State(state), headers).await.unwrap();
        assert_eq!(claims.email, "jo@fitlive.tv");
        assert!(claims.is_streamer);
    }

    #[tokio::test]
    async fn me_rejects_garbage_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            "token=garbage".parse().unwrap(),
        );
        let result = me(State(test_state()), headers).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn email_status_reflects_directory() {
        let state = test_state();

        let Json(verified) = email_status(
            State(state.clone()),
            Query(EmailStatusParams {
                email: "jo@fitlive.tv".to_string(),
            }),
        )
        .await;
        assert!(verified.verified);

        let Json(unverified) = email_status(
            State(state.clone()),
            Query(EmailStatusParams {
                email: "new@fitlive.tv".to_string(),
            }),
        )
        .await;
        assert!(!unverified.verified);

        let Json(unknown) = email_status(
            State(state),
            Query(EmailStatusParams {
                email: "nobody@fitlive.tv".to_string(),
            }),
        )
        .await;
        assert!(!unknown.verified);
    }
}
