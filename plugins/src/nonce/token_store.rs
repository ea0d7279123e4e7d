//! Request-forgery tokens bound to an action and a user.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use stoplist_core::api::{NonceVerifier, Principal};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct IssuedToken {
    value: String,
    issued_at: DateTime<Utc>,
}

/// Keeps one live token per (action, login). Issuing again returns the live
/// token; verification renews it.
#[derive(Debug)]
pub struct TokenNonceStore {
    ttl: Duration,
    tokens: Mutex<HashMap<(String, String), IssuedToken>>,
}

impl TokenNonceStore {
    pub fn new(ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self {
            ttl,
            tokens: Mutex::new(HashMap::new()),
        }
    }

    fn is_live(&self, token: &IssuedToken, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(token.issued_at) < self.ttl
    }

    fn key(action: &str, principal: &Principal) -> (String, String) {
        (action.to_string(), principal.login.clone())
    }
}

impl NonceVerifier for TokenNonceStore {
    fn issue(&self, action: &str, principal: &Principal) -> String {
        let now = Utc::now();
        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        tokens.retain(|_, t| self.is_live(t, now));

        tokens
            .entry(Self::key(action, principal))
            .or_insert_with(|| IssuedToken {
                value: Uuid::new_v4().to_string(),
                issued_at: now,
            })
            .value
            .clone()
    }

    fn verify(&self, token: &str, action: &str, principal: &Principal) -> bool {
        let now = Utc::now();
        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        tokens.retain(|_, t| self.is_live(t, now));

        match tokens.get_mut(&Self::key(action, principal)) {
            Some(issued) if issued.value == token => {
                issued.issued_at = now;
                true
            }
            _ => {
                tracing::debug!(action, login = %principal.login, "nonce rejected");
                false
            }
        }
    }
}
