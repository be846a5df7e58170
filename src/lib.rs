// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

//! FitLive Access-Control Service
//!
//! The access-control layer of the FitLive live-streaming fitness
//! platform: stateless session tokens for end users, a flag cookie for
//! the admin surface, and the request-time gate that runs ahead of every
//! page render.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - session tokens, password checks, and the access gate
//! - `cookies` - explicit cookie read/write values
//! - `config` - environment configuration, loaded once at startup
//! - `store` - user-directory contract (external collaborator)

pub mod api;
pub mod auth;
pub mod config;
pub mod cookies;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
