// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

//! Admin session endpoints.
//!
//! The admin surface uses the flag cookie, not the user-domain session
//! token. Logging in compares credentials with the slow Argon2 check and
//! sets `admin_session=true`; the access gate later reads that flag. Any
//! mismatch — unknown email, wrong password, missing configuration —
//! yields the same 401 so attempts cannot enumerate the admin account.

use axum::{
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use axum::extract::State;

use crate::{
    auth::{
        gate::{ADMIN_FLAG_COOKIE, ADMIN_FLAG_VALUE},
        password::verify_password,
    },
    cookies::{CookieMap, SetCookie},
    error::ApiError,
    models::{AdminCheckResponse, AdminLoginRequest, AdminLoginResponse, AdminLogoutResponse},
    state::AppState,
};

/// Log an admin in and set the flag cookie.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "Admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Logged in; admin flag cookie set", body = AdminLoginResponse),
        (status = 401, description = "Invalid credentials (uniform for every mismatch)")
    )
)]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(admin) = state.admin.as_ref() else {
        tracing::warn!("admin login attempted but no admin credentials are configured");
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    if !request.email.eq_ignore_ascii_case(&admin.email) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }
    verify_password(&request.password, &admin.password_hash)
        .map_err(|_| ApiError::unauthorized("Invalid credentials"))?;

    let cookie = SetCookie::new(ADMIN_FLAG_COOKIE, ADMIN_FLAG_VALUE)
        .secure(state.cookie_secure)
        .to_header_value()
        .ok_or_else(|| ApiError::internal("admin cookie could not be rendered"))?;

    tracing::info!("admin logged in");

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(AdminLoginResponse { success: true }),
    ))
}

/// Report whether the request carries the admin flag cookie.
///
/// Never fails the request: cookie parsing cannot error (unreadable
/// headers degrade to "no cookies"), and any future internal failure is
/// reported in-band as `authenticated: false` with an `error` field.
#[utoipa::path(
    get,
    path = "/api/admin/check",
    tag = "Admin",
    responses(
        (status = 200, description = "Authentication state", body = AdminCheckResponse)
    )
)]
pub async fn admin_check(headers: HeaderMap) -> Json<AdminCheckResponse> {
    let cookies = CookieMap::from_headers(&headers);
    let authenticated = cookies.get(ADMIN_FLAG_COOKIE) == Some(ADMIN_FLAG_VALUE);

    Json(AdminCheckResponse {
        authenticated,
        error: None,
    })
}

/// Log the admin out by expiring the flag cookie.
#[utoipa::path(
    post,
    path = "/api/admin/logout",
    tag = "Admin",
    responses(
        (status = 200, description = "Flag cookie cleared", body = AdminLogoutResponse)
    )
)]
pub async fn admin_logout() -> impl IntoResponse {
    // Rendering a fixed-name empty cookie cannot produce illegal bytes.
    let cookie = SetCookie::expired(ADMIN_FLAG_COOKIE)
        .to_header_value()
        .unwrap_or_else(|| axum::http::HeaderValue::from_static("admin_session=; Max-Age=0"));

    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(AdminLogoutResponse { success: true }),
    )
}
