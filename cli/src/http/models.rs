//! HTTP API data models

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use stoplist_core::api::{
    AdminError, ContentHost, ContentId, ModerationError, PostStatus, SettingsForm,
    StoplistSettings, Verdict,
};

// ============= Settings =============

/// Stored settings plus the normalized list the gate actually matches against.
#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub action: String,
    pub tags: Vec<String>,
    pub forbidden_tags: Vec<String>,
}

impl From<&StoplistSettings> for SettingsView {
    fn from(settings: &StoplistSettings) -> Self {
        Self {
            action: settings.action.as_str().to_string(),
            tags: settings.tags.clone(),
            forbidden_tags: settings
                .forbidden_tags()
                .iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub success: bool,
    pub settings: SettingsView,
}

/// Admin form as posted by the settings page (`application/x-www-form-urlencoded`).
#[derive(Debug, Default, Deserialize)]
pub struct AdminForm {
    #[serde(rename = "stoplist[action]", default)]
    pub action: Option<String>,
    #[serde(rename = "stoplist[tags]", default)]
    pub tags: Option<String>,
    #[serde(rename = "stoplist_nonce", default)]
    pub nonce: Option<String>,
}

impl AdminForm {
    pub fn settings_form(&self) -> SettingsForm {
        SettingsForm {
            action: self.action.clone(),
            tags: self.tags.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminPageQuery {
    #[serde(default)]
    pub updated: Option<String>,
}

// ============= Save =============

/// Item state after an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemState {
    pub id: ContentId,
    pub status: PostStatus,
    pub tags: Vec<String>,
}

impl ItemState {
    pub fn load(host: &dyn ContentHost, id: ContentId) -> anyhow::Result<Option<Self>> {
        let Some(status) = host.status(id)? else {
            return Ok(None);
        };
        Ok(Some(Self {
            id,
            status,
            tags: host.tags(id)?,
        }))
    }
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemState>,
}

// ============= Health =============

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub session_id: String,
    pub uptime_seconds: f64,
    pub requests_handled: u64,
    pub timestamp: String,
}

// ============= Error Handling =============

#[derive(Debug)]
pub enum HttpServerError {
    InvalidRequest(String),
    Forbidden(String),
    Moderation(String),
    Internal(String),
}

impl From<AdminError> for HttpServerError {
    fn from(e: AdminError) -> Self {
        match e {
            AdminError::Unauthorized => Self::Forbidden(e.to_string()),
            AdminError::MissingNonce | AdminError::InvalidNonce => {
                Self::InvalidRequest(e.to_string())
            }
            AdminError::Store(_) => Self::Internal(e.to_string()),
        }
    }
}

impl From<ModerationError> for HttpServerError {
    fn from(e: ModerationError) -> Self {
        Self::Moderation(format!("{e:#}"))
    }
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            Self::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg),
            Self::Moderation(msg) => (StatusCode::BAD_GATEWAY, "MODERATION_ERROR", msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = serde_json::json!({
            "success": false,
            "error": message,
            "error_code": error_code,
        });

        (status, Json(body)).into_response()
    }
}
