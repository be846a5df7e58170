// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

//! Authentication and access control.
//!
//! - `claims` - session claims types
//! - `session` - token issuance and verification (HS256)
//! - `password` - Argon2id credential comparison
//! - `gate` - per-request access gate middleware
//! - `error` - the auth error taxonomy

pub mod claims;
pub mod error;
pub mod gate;
pub mod password;
pub mod session;

pub use claims::{SessionClaims, SessionIdentity};
pub use error::AuthError;
pub use gate::{access_gate, decide, RouteDecision};
pub use session::{SessionTokens, SESSION_COOKIE};
