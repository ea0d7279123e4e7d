//! Browser sessions for the admin settings page.
//!
//! A caller that opens the page with the admin bearer token gets an HttpOnly
//! session cookie, so the form the page renders can be posted back by a
//! browser that cannot attach the `Authorization` header itself.

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

use super::routes::ADMIN_PAGE_PATH;

pub const SESSION_COOKIE: &str = "stoplist_session";

pub struct AdminSessions {
    ttl: Duration,
    sessions: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl AdminSessions {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: i64::try_from(ttl_secs)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Starts a session and returns its token.
    pub fn issue(&self) -> String {
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|_, issued_at| self.is_live(*issued_at, now));
        sessions.insert(token.clone(), now);
        token
    }

    pub fn is_valid(&self, token: &str) -> bool {
        let sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions
            .get(token)
            .is_some_and(|issued_at| self.is_live(*issued_at, Utc::now()))
    }

    fn is_live(&self, issued_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(issued_at) < self.ttl
    }

    /// `Set-Cookie` value for `token`, scoped to the admin page.
    pub fn cookie(&self, token: &str) -> String {
        format!(
            "{SESSION_COOKIE}={token}; Path={ADMIN_PAGE_PATH}; Max-Age={}; HttpOnly; SameSite=Strict",
            self.ttl.num_seconds()
        )
    }
}

/// The session token from the request's `Cookie` header, if any.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}
