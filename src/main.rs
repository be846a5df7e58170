// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

use std::{env, net::SocketAddr, sync::Arc};

use fitlive_server::{
    api::router,
    auth::{password::hash_password, SessionTokens},
    config::{AppConfig, ConfigError},
    state::AppState,
    store::{InMemoryDirectory, UserRecord},
};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());

    match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Seed a directory user from the environment for local runs. The real
/// deployment talks to the platform's document database instead.
fn seed_directory() -> InMemoryDirectory {
    let mut directory = InMemoryDirectory::new();

    if let (Ok(email), Ok(password)) = (
        env::var("SEED_USER_EMAIL"),
        env::var("SEED_USER_PASSWORD"),
    ) {
        match hash_password(&password) {
            Ok(password_hash) => {
                tracing::info!(%email, "seeding directory user");
                directory.insert(UserRecord {
                    display_name: email
                        .split('@')
                        .next()
                        .unwrap_or("member")
                        .to_string(),
                    email,
                    password_hash,
                    is_streamer: env::var("SEED_USER_STREAMER").as_deref() == Ok("true"),
                    is_admin: false,
                    email_verified: true,
                });
            }
            Err(e) => tracing::warn!(error = %e, "could not hash seed user password"),
        }
    }

    directory
}

#[tokio::main]
async fn main() {
    init_tracing();

    // Configuration failures are fatal: without a signing secret no token
    // can be issued or verified.
    let config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "configuration error");
        std::process::exit(1);
    });

    let tokens = SessionTokens::new(&config.session_secret).unwrap_or_else(|e| {
        tracing::error!(error = %e, "token signer initialization failed");
        std::process::exit(1);
    });

    if config.admin.is_none() {
        tracing::warn!("no admin credentials configured; admin login is disabled");
    }

    let state = AppState::new(tokens, Arc::new(seed_directory())).with_config(&config);
    let app = router(state);

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .map_err(|_| ConfigError::InvalidBindAddr(config.bind_addr()))
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        });

    tracing::info!(%addr, "FitLive access-control service listening (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await
        .expect("server failed");
}
