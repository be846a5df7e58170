// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

//! Session token issuance and verification.
//!
//! [`SessionTokens`] is the single owner of the signing secret. It is built
//! once at startup from configuration and shared immutably across requests;
//! nothing else in the crate touches the secret. Issuance and verification
//! are pure computations with no I/O.

use std::time::Duration;

use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use super::{AuthError, SessionClaims, SessionIdentity};

/// Name of the session token cookie.
pub const SESSION_COOKIE: &str = "token";

/// Fallback token lifetime when the configured TTL does not parse.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Clock function returning the current Unix timestamp. Injectable so
/// expiry tests are deterministic.
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Parse a session TTL string: either an absolute number of seconds or a
/// `<N>d` days shorthand.
///
/// Unparseable input falls back to seven days. The silent fallback is
/// long-standing platform behavior that deployed configuration relies on;
/// a `warn!` makes it visible in the logs.
pub fn parse_session_ttl(raw: &str) -> Duration {
    let raw = raw.trim();
    if let Ok(seconds) = raw.parse::<u64>() {
        return Duration::from_secs(seconds);
    }
    if let Some(days) = raw.strip_suffix('d') {
        if let Ok(days) = days.parse::<u64>() {
            return Duration::from_secs(days * 24 * 3600);
        }
    }
    tracing::warn!(ttl = raw, "unparseable session TTL, falling back to 7 days");
    DEFAULT_SESSION_TTL
}

/// Claims as decoded off the wire, before shape checks.
///
/// Every field is optional so that a payload with missing claims decodes
/// cleanly and can be rejected as `MalformedClaims` rather than surfacing
/// as an opaque serde error.
#[derive(Debug, Deserialize)]
struct WireClaims {
    #[serde(default)]
    email: Option<String>,
    #[serde(default, rename = "isStreamer")]
    is_streamer: Option<bool>,
    #[serde(default, rename = "isAdmin")]
    is_admin: Option<bool>,
    #[serde(default)]
    iat: Option<i64>,
    #[serde(default)]
    exp: Option<i64>,
}

/// Claims as signed onto the wire.
#[derive(Debug, Serialize)]
struct SignedClaims<'a> {
    email: &'a str,
    #[serde(rename = "isStreamer")]
    is_streamer: bool,
    #[serde(rename = "isAdmin")]
    is_admin: bool,
    iat: i64,
    exp: i64,
}

/// Session token issuer and verifier.
///
/// Signs a claims + issued-at + expiration envelope with HMAC-SHA256 and
/// pins HS256 on verification: a token whose header names any other
/// algorithm fails as [`AuthError::InvalidToken`] rather than being
/// evaluated under that algorithm.
pub struct SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Clock,
}

impl SessionTokens {
    /// Build from the signing secret.
    ///
    /// Fails with [`AuthError::MissingSecret`] on an empty secret; callers
    /// surface this at startup, not per-request.
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        if secret.trim().is_empty() {
            return Err(AuthError::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is evaluated against the injectable clock below, not the
        // library's system-time check.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock: system_clock,
        })
    }

    /// Replace the clock used for issued-at and expiry evaluation.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Mint a signed session token for `identity`, valid for `ttl`.
    pub fn issue(&self, identity: &SessionIdentity, ttl: Duration) -> Result<String, AuthError> {
        let iat = (self.clock)();
        let exp = iat + ttl.as_secs() as i64;

        let claims = SignedClaims {
            email: &identity.email,
            is_streamer: identity.is_streamer,
            is_admin: identity.is_admin,
            iat,
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("token encoding failed: {e}")))
    }

    /// Verify a token and recover its claims.
    ///
    /// Failure kinds are distinct and drive different responses upstream:
    /// - [`AuthError::InvalidToken`]: signature mismatch, structural damage,
    ///   or a non-HS256 algorithm in the header
    /// - [`AuthError::Expired`]: current time past the `exp` claim
    /// - [`AuthError::MalformedClaims`]: a required claim field missing or
    ///   of the wrong type
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;
        if header.alg != Algorithm::HS256 {
            return Err(AuthError::InvalidToken);
        }

        let data = decode::<WireClaims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::Json(_) => AuthError::MalformedClaims,
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken,
            }
        })?;

        let wire = data.claims;
        let (Some(email), Some(is_streamer), Some(is_admin), Some(exp)) =
            (wire.email, wire.is_streamer, wire.is_admin, wire.exp)
        else {
            return Err(AuthError::MalformedClaims);
        };

        if (self.clock)() >= exp {
            return Err(AuthError::Expired);
        }

        Ok(SessionClaims {
            email,
            is_streamer,
            is_admin,
            iat: wire.iat.unwrap_or(0),
            exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_clock() -> i64 {
        1_700_000_000
    }

    fn later_clock() -> i64 {
        1_700_000_010
    }

    fn tokens() -> SessionTokens {
        SessionTokens::new("test-secret").unwrap().with_clock(fixed_clock)
    }

    fn identity() -> SessionIdentity {
        SessionIdentity {
            email: "jo@fitlive.tv".to_string(),
            is_streamer: true,
            is_admin: false,
        }
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(
            SessionTokens::new(""),
            Err(AuthError::MissingSecret)
        ));
        assert!(matches!(
            SessionTokens::new("  "),
            Err(AuthError::MissingSecret)
        ));
    }

    #[test]
    fn round_trip_preserves_claims() {
        let tokens = tokens();
        let token = tokens.issue(&identity(), Duration::from_secs(3600)).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.email, "jo@fitlive.tv");
        assert!(claims.is_streamer);
        assert!(!claims.is_admin);
        assert_eq!(claims.iat, fixed_clock());
        assert_eq!(claims.exp, fixed_clock() + 3600);
    }

    #[test]
    fn short_ttl_token_expires() {
        let issued = tokens().issue(&identity(), Duration::from_secs(1)).unwrap();

        // Same secret, clock advanced past the 1-second lifetime.
        let verifier = SessionTokens::new("test-secret").unwrap().with_clock(later_clock);
        assert!(matches!(verifier.verify(&issued), Err(AuthError::Expired)));
    }

    #[test]
    fn token_valid_before_expiry() {
        let issued = tokens().issue(&identity(), Duration::from_secs(60)).unwrap();
        let verifier = SessionTokens::new("test-secret").unwrap().with_clock(later_clock);
        assert!(verifier.verify(&issued).is_ok());
    }

    #[test]
    fn wrong_secret_fails_as_invalid() {
        let issued = tokens().issue(&identity(), Duration::from_secs(60)).unwrap();
        let other = SessionTokens::new("other-secret").unwrap().with_clock(fixed_clock);
        assert!(matches!(other.verify(&issued), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn tampered_bytes_fail_as_invalid() {
        let tokens = tokens();
        let issued = tokens.issue(&identity(), Duration::from_secs(60)).unwrap();

        // Flip one character in the payload and in the signature segment.
        let first_dot = issued.find('.').unwrap();
        let last_dot = issued.rfind('.').unwrap();
        for index in [first_dot + 2, last_dot + 2] {
            let mut bytes = issued.clone().into_bytes();
            bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();
            if tampered == issued {
                continue;
            }
            assert!(
                matches!(tokens.verify(&tampered), Err(AuthError::InvalidToken)),
                "tampered token at byte {index} must fail as InvalidToken"
            );
        }
    }

    #[test]
    fn garbage_token_fails_as_invalid() {
        let tokens = tokens();
        assert!(matches!(
            tokens.verify("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(tokens.verify(""), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn different_algorithm_is_rejected() {
        let tokens = tokens();
        let claims = SignedClaims {
            email: "jo@fitlive.tv",
            is_streamer: false,
            is_admin: false,
            iat: fixed_clock(),
            exp: fixed_clock() + 60,
        };
        let hs384 = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(tokens.verify(&hs384), Err(AuthError::InvalidToken)));
    }

    /// Sign an arbitrary JSON payload with the test secret, bypassing the
    /// issuer, to exercise claim-shape failures.
    fn sign_raw_payload(payload: serde_json::Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn missing_claim_fields_are_malformed() {
        let tokens = tokens();
        let token = sign_raw_payload(serde_json::json!({
            "email": "jo@fitlive.tv",
            "exp": 1_700_000_060,
        }));
        assert!(matches!(
            tokens.verify(&token),
            Err(AuthError::MalformedClaims)
        ));
    }

    #[test]
    fn wrong_claim_types_are_malformed() {
        let tokens = tokens();
        let token = sign_raw_payload(serde_json::json!({
            "email": "jo@fitlive.tv",
            "isStreamer": "yes",
            "isAdmin": false,
            "iat": 1,
            "exp": 1_700_000_060,
        }));
        assert!(matches!(
            tokens.verify(&token),
            Err(AuthError::MalformedClaims)
        ));
    }

    #[test]
    fn missing_exp_is_malformed() {
        let tokens = tokens();
        let token = sign_raw_payload(serde_json::json!({
            "email": "jo@fitlive.tv",
            "isStreamer": true,
            "isAdmin": false,
        }));
        assert!(matches!(
            tokens.verify(&token),
            Err(AuthError::MalformedClaims)
        ));
    }

    #[test]
    fn ttl_parses_seconds_and_days() {
        assert_eq!(parse_session_ttl("3600"), Duration::from_secs(3600));
        assert_eq!(parse_session_ttl("30d"), Duration::from_secs(30 * 24 * 3600));
        assert_eq!(parse_session_ttl("7d"), DEFAULT_SESSION_TTL);
    }

    #[test]
    fn unparseable_ttl_falls_back_to_seven_days() {
        assert_eq!(parse_session_ttl("soon"), DEFAULT_SESSION_TTL);
        assert_eq!(parse_session_ttl("2w"), DEFAULT_SESSION_TTL);
        assert_eq!(parse_session_ttl(""), DEFAULT_SESSION_TTL);
    }
}
