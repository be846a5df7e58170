// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

//! Request-time access gate.
//!
//! [`decide`] is a pure, synchronous function of the request path, query
//! string, and cookies. It runs ahead of every page render and produces a
//! [`RouteDecision`]: pass the request through or redirect it. The axum
//! wrapper [`access_gate`] applies that decision per request.
//!
//! Two independent two-state automata, composed by path prefix:
//! the admin flag cookie gates `/admin`, and the `email` query parameter
//! gates `/onboarding`. There is no cross-talk between them.
//!
//! The gate never errors. Anything unreadable — cookie headers with bad
//! bytes, malformed pairs — degrades to "no cookies", which is the most
//! restrictive outcome for the gated areas.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::cookies::CookieMap;

/// Reserved admin area prefix.
pub const ADMIN_PREFIX: &str = "/admin";

/// The admin login page, reachable without the flag cookie.
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";

/// Where an already-authenticated admin lands.
pub const ADMIN_DASHBOARD_PATH: &str = "/admin/dashboard";

/// Onboarding flow prefix.
pub const ONBOARDING_PREFIX: &str = "/onboarding";

/// The onboarding sub-path that is always reachable.
pub const ONBOARDING_OPTIONS_PATH: &str = "/onboarding/options";

/// Landing page, target of the onboarding redirect.
pub const LANDING_PATH: &str = "/";

/// Name of the admin flag cookie.
pub const ADMIN_FLAG_COOKIE: &str = "admin_session";

/// The only meaningful admin flag value.
///
/// The flag carries no claims, signature, or identity binding: the exact
/// value being present is the entire admin-authenticated predicate. Kept
/// for compatibility with deployed clients; `HttpOnly` + `Secure` are the
/// only protections it has.
pub const ADMIN_FLAG_VALUE: &str = "true";

/// Why a redirect was issued. Used for logging, not exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Admin area requested without the flag cookie.
    AdminUnauthenticated,
    /// Admin login requested while already carrying the flag.
    AdminAlreadyAuthenticated,
    /// Onboarding requested without an `email` query parameter.
    EmailParamMissing,
}

impl RedirectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectReason::AdminUnauthenticated => "admin_unauthenticated",
            RedirectReason::AdminAlreadyAuthenticated => "admin_already_authenticated",
            RedirectReason::EmailParamMissing => "email_param_missing",
        }
    }
}

/// Per-request gate outcome. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Let the request through to the page or handler.
    Allow,
    /// Redirect the request elsewhere.
    Redirect {
        location: String,
        reason: RedirectReason,
    },
}

/// Static assets and API routes bypass path-based redirection entirely,
/// so asset loads and JSON endpoints never receive an HTML redirect.
fn is_exempt(path: &str) -> bool {
    if path.starts_with("/api/") {
        return true;
    }
    // Extension match: a dot in the final path segment marks an asset.
    path.rsplit('/').next().is_some_and(|segment| segment.contains('.'))
}

/// True when the path lies under `prefix` with a proper segment boundary
/// (`/admin` matches `/admin` and `/admin/x`, not `/administrator`).
fn under_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// True when the query string carries a non-empty `email` parameter.
fn has_email_param(query: &str) -> bool {
    url::form_urlencoded::parse(query.as_bytes())
        .any(|(key, value)| key == "email" && !value.trim().is_empty())
}

/// Location for the onboarding redirect, carrying error + message params.
fn landing_redirect_location() -> String {
    let params = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("error", "verification_required")
        .append_pair("message", "Please verify your email to continue")
        .finish();
    format!("{LANDING_PATH}?{params}")
}

/// Decide what to do with a request, ahead of any page logic.
///
/// Rules, evaluated in order:
/// 1. static assets and `/api/` routes are exempt
/// 2. admin area without the flag cookie redirects to the admin login
/// 3. admin login with the flag cookie redirects to the dashboard
/// 4. onboarding (except the options sub-path) without an `email` query
///    parameter redirects to the landing page — a presence check only; the
///    authoritative verification is the email-status API
/// 5. everything else is allowed
pub fn decide(path: &str, query: &str, cookies: &CookieMap) -> RouteDecision {
    if is_exempt(path) {
        return RouteDecision::Allow;
    }

    let admin_flag = cookies.get(ADMIN_FLAG_COOKIE) == Some(ADMIN_FLAG_VALUE);

    if path == ADMIN_LOGIN_PATH {
        if admin_flag {
            return RouteDecision::Redirect {
                location: ADMIN_DASHBOARD_PATH.to_string(),
                reason: RedirectReason::AdminAlreadyAuthenticated,
            };
        }
        return RouteDecision::Allow;
    }

    if under_prefix(path, ADMIN_PREFIX) && !admin_flag {
        return RouteDecision::Redirect {
            location: ADMIN_LOGIN_PATH.to_string(),
            reason: RedirectReason::AdminUnauthenticated,
        };
    }

    if under_prefix(path, ONBOARDING_PREFIX)
        && path != ONBOARDING_OPTIONS_PATH
        && !has_email_param(query)
    {
        return RouteDecision::Redirect {
            location: landing_redirect_location(),
            reason: RedirectReason::EmailParamMissing,
        };
    }

    RouteDecision::Allow
}

/// Axum middleware applying [`decide`] to each inbound request.
///
/// Redirects use `303 See Other` so the browser re-requests with GET.
pub async fn access_gate(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let query = request.uri().query().unwrap_or("").to_string();
    let cookies = CookieMap::from_headers(request.headers());

    match decide(&path, &query, &cookies) {
        RouteDecision::Allow => next.run(request).await,
        RouteDecision::Redirect { location, reason } => {
            tracing::debug!(%path, %location, reason = reason.as_str(), "access gate redirect");
            Redirect::to(&location).into_response()
        }
    }
}
