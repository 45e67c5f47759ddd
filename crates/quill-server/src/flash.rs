// SPDX-License-Identifier: Apache-2.0
//! One-shot flash notices carried across a redirect in a cookie. The payload
//! is base64url so arbitrary message text stays cookie-safe; the page that
//! renders the notice clears the cookie in the same response.

use crate::cookies::{clear_cookie, cookie_value, set_cookie, FLASH_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlashLevel {
    Success,
    Error,
    Info,
}

impl FlashLevel {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Flash {
    pub(crate) level: FlashLevel,
    pub(crate) message: String,
}

impl Flash {
    pub(crate) fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    pub(crate) fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }

    fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(format!("{}\t{}", self.level.as_str(), self.message))
    }

    fn decode(raw: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        let (level, message) = text.split_once('\t')?;
        Some(Self {
            level: FlashLevel::parse(level)?,
            message: message.to_string(),
        })
    }

    pub(crate) fn to_set_cookie(&self) -> Option<HeaderValue> {
        set_cookie(FLASH_COOKIE, &self.encode())
    }
}

/// Reads the pending notice, if any. The caller clears the cookie when it
/// renders the notice (see [`clear_flash_cookie`]).
pub(crate) fn take_flash(headers: &HeaderMap) -> Option<Flash> {
    cookie_value(headers, FLASH_COOKIE).and_then(|raw| Flash::decode(&raw))
}

pub(crate) fn clear_flash_cookie() -> Option<HeaderValue> {
    clear_cookie(FLASH_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn flash_round_trips_through_cookie_payload() {
        let flash = Flash::error("Wrong password");
        let decoded = Flash::decode(&flash.encode()).expect("decode");
        assert_eq!(decoded, flash);
    }

    #[test]
    fn message_with_tabs_and_unicode_survives() {
        let flash = Flash::info("a\tb ≠ c");
        let decoded = Flash::decode(&flash.encode()).expect("decode");
        assert_eq!(decoded.message, "a\tb ≠ c");
    }

    #[test]
    fn garbage_cookie_payload_is_ignored() {
        assert!(Flash::decode("%%%not-base64%%%").is_none());
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("quill_flash=!!bad-payload"),
        );
        assert!(take_flash(&headers).is_none());
    }

    #[test]
    fn take_flash_reads_the_pending_notice() {
        let flash = Flash::success("Post created");
        let cookie = flash.to_set_cookie().expect("set cookie");
        let pair = cookie
            .to_str()
            .expect("ascii")
            .split(';')
            .next()
            .expect("cookie pair")
            .to_string();
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(&pair).expect("cookie header"));
        assert_eq!(take_flash(&headers), Some(flash));
    }
}
