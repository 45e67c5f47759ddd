// SPDX-License-Identifier: Apache-2.0
//! Minimal cookie plumbing: one session cookie, one flash cookie, both
//! path-wide. Values are restricted to cookie-safe alphabets by their
//! producers (alphanumeric tokens, base64url flash payloads).

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

pub(crate) const SESSION_COOKIE: &str = "quill_session";
pub(crate) const FLASH_COOKIE: &str = "quill_flash";

pub(crate) fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((key, value)) = pair.trim().split_once('=') {
                if key == name {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

pub(crate) fn set_cookie(name: &str, value: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax")).ok()
}

pub(crate) fn clear_cookie(name: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("{name}=; Path=/; Max-Age=0")).ok()
}
