// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 FitLive

//! Explicit cookie values.
//!
//! Cookies are modelled as plain data passed into and out of handlers:
//! [`CookieMap`] is the read side (parsed once from the request headers)
//! and [`SetCookie`] is the write side (a write-intent rendered to a
//! `Set-Cookie` header value). Nothing in the crate mutates a shared
//! cookie jar.

use std::collections::HashMap;

use axum::http::{header::COOKIE, HeaderMap, HeaderValue};

/// Cookies parsed from a request's `Cookie` headers.
///
/// Parsing never fails: unreadable header bytes and malformed pairs are
/// skipped, which downstream code treats the same as an absent cookie.
#[derive(Debug, Default, Clone)]
pub struct CookieMap(HashMap<String, String>);

impl CookieMap {
    /// Parse all `Cookie` headers on a request.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut map = HashMap::new();
        for header in headers.get_all(COOKIE) {
            let Ok(raw) = header.to_str() else {
                continue;
            };
            for pair in raw.split(';') {
                if let Some((name, value)) = pair.split_once('=') {
                    map.insert(name.trim().to_string(), value.trim().to_string());
                }
            }
        }
        Self(map)
    }

    /// Look up a cookie value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// A write-intent for a single cookie.
///
/// Defaults: `HttpOnly`, `Path=/`, not `Secure`, session-scoped lifetime.
#[derive(Debug, Clone)]
pub struct SetCookie {
    name: String,
    value: String,
    http_only: bool,
    secure: bool,
    path: String,
    max_age: Option<i64>,
}

impl SetCookie {
    /// Create a new cookie write-intent with the default attributes.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            http_only: true,
            secure: false,
            path: "/".to_string(),
            max_age: None,
        }
    }

    /// A write-intent that removes the named cookie (`Max-Age=0`).
    pub fn expired(name: impl Into<String>) -> Self {
        Self::new(name, "").max_age(0)
    }

    /// Set the `Secure` attribute.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the `Max-Age` attribute in seconds.
    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Render the `Set-Cookie` header string.
    pub fn to_header_string(&self) -> String {
        let mut out = format!("{}={}; Path={}", self.name, self.value, self.path);
        if let Some(max_age) = self.max_age {
            out.push_str(&format!("; Max-Age={max_age}"));
        }
        if self.http_only {
            out.push_str("; HttpOnly");
        }
        if self.secure {
            out.push_str("; Secure");
        }
        out.push_str("; SameSite=Lax");
        out
    }

    /// Render the `Set-Cookie` header value.
    ///
    /// Returns `None` only if the name or value contains bytes that are not
    /// legal in a header, which the crate's fixed cookie names never do.
    pub fn to_header_value(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.to_header_string()).ok()
    }
}
