// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{access_gate, SessionClaims},
    models::{
        AdminCheckResponse, AdminLoginRequest, AdminLoginResponse, AdminLogoutResponse,
        EmailStatusResponse, LoginRequest, ProfileResponse,
    },
    state::AppState,
};

pub mod admin;
pub mod auth;
pub mod health;

/// Non-API paths are pages, rendered by the web frontend. This service
/// only gates them; a path that passes the gate and reaches no handler is
/// simply not ours.
async fn page_fallback() -> StatusCode {
    StatusCode::NOT_FOUND
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/auth/email-status", get(auth::email_status))
        .route("/admin/login", post(admin::admin_login))
        .route("/admin/check", get(admin::admin_check))
        .route("/admin/logout", post(admin::admin_logout))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(page_fallback)
        // The gate runs ahead of everything above, including the fallback.
        .layer(middleware::from_fn(access_gate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::me,
        auth::email_status,
        admin::admin_login,
        admin::admin_check,
        admin::admin_logout,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            LoginRequest,
            ProfileResponse,
            EmailStatusResponse,
            AdminLoginRequest,
            AdminLoginResponse,
            AdminCheckResponse,
            AdminLogoutResponse,
            SessionClaims
        )
    ),
    tags(
        (name = "Auth", description = "User sessions and email verification"),
        (name = "Admin", description = "Admin flag-cookie session"),
        (name = "Health", description = "Liveness probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::auth::SessionTokens;
    use crate::config::AdminCredentials;
    use crate::store::{InMemoryDirectory, UserRecord};
    use axum::body::Body;
    use axum::http::{header, Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    const PASSWORD: &str = "sweat-every-day";

    fn test_app() -> Router {
        let mut directory = InMemoryDirectory::new();
        directory.insert(UserRecord {
            email: "jo@fitlive.tv".to_string(),
            display_name: "Jo".to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            is_streamer: false,
            is_admin: false,
            email_verified: true,
        });

        let state = AppState::new(
            SessionTokens::new("test-secret").unwrap(),
            Arc::new(directory),
        )
        .with_admin(AdminCredentials {
            email: "admin@fitlive.tv".to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
        });

        router(state)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn get_request_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = test_app();
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn admin_page_redirects_without_flag() {
        let response = test_app()
            .oneshot(get_request("/admin/dashboard"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/admin/login"
        );
    }

    #[tokio::test]
    async fn admin_login_page_redirects_with_flag() {
        let response = test_app()
            .oneshot(get_request_with_cookie("/admin/login", "admin_session=true"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/admin/dashboard"
        );
    }

    #[tokio::test]
    async fn onboarding_redirects_without_email_param() {
        let response = test_app()
            .oneshot(get_request("/onboarding/profile"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(location.starts_with("/?error=verification_required"));
    }

    #[tokio::test]
    async fn static_asset_is_never_redirected() {
        let response = test_app().oneshot(get_request("/logo.png")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = test_app()
            .oneshot(get_request_with_cookie("/logo.png", "admin_session=true"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn api_routes_bypass_the_gate() {
        let response = test_app()
            .oneshot(get_request("/api/admin/check"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn login_end_to_end_sets_cookie() {
        let body = serde_json::json!({
            "email": "jo@fitlive.tv",
            "password": PASSWORD,
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("token="));
    }

    #[tokio::test]
    async fn health_is_reachable() {
        let response = test_app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
