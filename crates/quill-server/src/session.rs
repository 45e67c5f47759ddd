// SPDX-License-Identifier: Apache-2.0
//! Server-side session registry. Login mints a random token and hands it to
//! the browser in the session cookie; the guard checks the token against
//! this registry on every admin request. Tokens expire after the configured
//! ttl and are dropped lazily on the next check.

use crate::cookies::{cookie_value, SESSION_COOKIE};
use axum::http::HeaderMap;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

const TOKEN_LEN: usize = 32;

#[derive(Clone)]
pub struct SessionStore {
    ttl: Duration,
    tokens: Arc<RwLock<HashMap<String, Instant>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Mints a fresh session token valid for the configured ttl.
    pub async fn issue(&self) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();
        self.tokens
            .write()
            .await
            .insert(token.clone(), Instant::now() + self.ttl);
        token
    }

    pub async fn revoke(&self, token: &str) {
        self.tokens.write().await.remove(token);
    }

    pub async fn is_valid(&self, token: &str) -> bool {
        let mut tokens = self.tokens.write().await;
        match tokens.get(token) {
            Some(expiry) if *expiry > Instant::now() => true,
            Some(_) => {
                tokens.remove(token);
                false
            }
            None => false,
        }
    }

    /// The session flag for one request: does it carry a live token?
    pub async fn authenticated(&self, headers: &HeaderMap) -> bool {
        match cookie_value(headers, SESSION_COOKIE) {
            Some(token) => self.is_valid(&token).await,
            None => false,
        }
    }
}
