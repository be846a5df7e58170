// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

//! Session claims carried inside the signed token.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The identity facts a session asserts. This is the input to token
/// issuance; timestamps are added by the issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Account email, the primary user key.
    pub email: String,
    /// Whether the account may host live sessions.
    pub is_streamer: bool,
    /// Whether the account has admin privileges.
    pub is_admin: bool,
}

/// Claims recovered from a verified session token.
///
/// Wire field names are camelCase (`isStreamer`, `isAdmin`) for
/// compatibility with tokens already held by deployed clients. Claims are
/// immutable once issued; changing them means minting a new token. There
/// is no server-side revocation list, so a token stays valid until `exp`
/// even after a client-side logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionClaims {
    /// Account email.
    pub email: String,

    /// Whether the account may host live sessions.
    #[serde(rename = "isStreamer")]
    pub is_streamer: bool,

    /// Whether the account has admin privileges.
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,

    /// Issued-at Unix timestamp.
    pub iat: i64,

    /// Expiration Unix timestamp.
    pub exp: i64,
}

impl SessionClaims {
    /// The identity portion of the claims, without timestamps.
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            email: self.email.clone(),
            is_streamer: self.is_streamer,
            is_admin: self.is_admin,
        }
    }
}
