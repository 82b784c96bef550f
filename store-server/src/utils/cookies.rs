//! Cookie helpers
//!
//! The server only deals with a handful of fixed cookies (the refresh token
//! and the review anti-abuse markers), so a small builder/parser over the
//! `http` header types is all that is needed.

use http::HeaderMap;
use http::header::COOKIE;

/// Refresh token cookie, scoped to the auth endpoints
pub const REFRESH_COOKIE: &str = "refresh_token";
pub const REFRESH_COOKIE_PATH: &str = "/api/auth";

/// Anti-abuse marker set after a review submission
pub const REVIEW_SUBMITTED_COOKIE: &str = "review_submitted";

/// Anti-abuse cookie lifetime (~6 months)
pub const SIX_MONTHS_SECS: i64 = 180 * 24 * 60 * 60;

/// Per-review helpful-vote marker
pub fn review_liked_cookie(review_id: i64) -> String {
    format!("review_liked_{review_id}")
}

/// Build a Set-Cookie value: httpOnly, SameSite=Strict, optional Secure
pub fn build_cookie(
    name: &str,
    value: &str,
    max_age_secs: i64,
    path: &str,
    secure: bool,
) -> String {
    let mut cookie =
        format!("{name}={value}; Max-Age={max_age_secs}; Path={path}; HttpOnly; SameSite=Strict");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build a Set-Cookie value that removes the cookie
pub fn clear_cookie(name: &str, path: &str) -> String {
    format!("{name}=; Max-Age=0; Path={path}; HttpOnly; SameSite=Strict")
}

/// Extract a named cookie from the request headers
pub fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for value in headers.get_all(COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((k, v)) = pair.trim().split_once('=')
                && k == name
            {
                return Some(v.to_string());
            }
        }
    }
    None
}
