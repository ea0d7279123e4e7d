//! Shared handler state.

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use stoplist_core::api::{AppConfig, Services, StoplistGate};

use super::session::AdminSessions;

/// Shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub session_id: String,
    pub services: Arc<Services>,
    pub gate: Arc<StoplistGate>,
    pub config: Arc<AppConfig>,
    pub admin_sessions: Arc<AdminSessions>,
    pub stats: Arc<RwLock<ServerStats>>,
}

impl AppState {
    pub fn new(
        session_id: String,
        services: Services,
        gate: Arc<StoplistGate>,
        config: AppConfig,
    ) -> Self {
        Self {
            session_id,
            services: Arc::new(services),
            gate,
            admin_sessions: Arc::new(AdminSessions::new(config.admin.nonce_ttl_secs)),
            config: Arc::new(config),
            stats: Arc::new(RwLock::new(ServerStats::new())),
        }
    }

    pub fn record_request(&self, endpoint: &str) {
        self.stats
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .increment_request(endpoint);
    }

    pub fn record_error(&self) {
        self.stats
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .increment_error();
    }
}

pub struct ServerStats {
    pub requests_total: u64,
    pub requests_by_endpoint: HashMap<String, u64>,
    pub errors_total: u64,
    pub start_time: DateTime<Local>,
}

impl ServerStats {
    pub fn new() -> Self {
        Self {
            requests_total: 0,
            requests_by_endpoint: HashMap::new(),
            errors_total: 0,
            start_time: Local::now(),
        }
    }

    pub fn increment_request(&mut self, endpoint: &str) {
        self.requests_total += 1;
        *self
            .requests_by_endpoint
            .entry(endpoint.to_string())
            .or_insert(0) += 1;
    }

    pub fn increment_error(&mut self) {
        self.errors_total += 1;
    }

    pub fn uptime_seconds(&self) -> f64 {
        let now = Local::now();
        (now - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}
