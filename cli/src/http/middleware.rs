//! Middleware and request authentication.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Method, Request},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use stoplist_core::api::{AdminConfig, Principal};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

use super::session::{session_token, AdminSessions};

/// Login the configured API key authenticates as.
pub const ADMIN_LOGIN: &str = "admin";

pub fn create_middleware_stack() -> tower::layer::util::Stack<CorsLayer, TimeoutLayer> {
    tower::layer::util::Stack::new(create_cors_layer(), create_timeout_layer())
}

/// CORS: localhost origins only.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            |origin: &HeaderValue, _| {
                origin
                    .to_str()
                    .map(|s| {
                        s.starts_with("http://localhost")
                            || s.starts_with("https://localhost")
                            || s.starts_with("http://127.0.0.1")
                            || s.starts_with("https://127.0.0.1")
                    })
                    .unwrap_or(false)
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

fn create_timeout_layer() -> TimeoutLayer {
    TimeoutLayer::new(Duration::from_secs(30))
}

pub fn create_trace_layer(
) -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
}

pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request completed"
        );
    }

    response
}

/// Resolves the caller. A bearer token equal to `admin.api_key`, or a live
/// admin session cookie, is an administrator; everyone else is anonymous and
/// holds no capabilities.
pub fn principal_from_headers(
    headers: &HeaderMap,
    admin: &AdminConfig,
    sessions: &AdminSessions,
) -> Principal {
    let Some(expected) = admin.api_key.as_deref().filter(|k| !k.is_empty()) else {
        return Principal::anonymous();
    };

    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    match presented {
        Some(token) if token == expected => Principal::administrator(ADMIN_LOGIN),
        Some(_) => {
            warn!("rejected admin bearer token");
            Principal::anonymous()
        }
        None => match session_token(headers) {
            Some(token) if sessions.is_valid(token) => Principal::administrator(ADMIN_LOGIN),
            Some(_) => {
                warn!("rejected admin session cookie");
                Principal::anonymous()
            }
            None => Principal::anonymous(),
        },
    }
}
