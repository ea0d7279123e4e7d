//! HTTP route handlers

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::Local;
use stoplist_core::api::{
    update_options, ActionMode, AdminError, SaveEvent, StoplistSettings, MANAGE_OPTIONS,
    NONCE_ACTION, NONCE_FIELD, UPDATE_OPTIONS_ACTION,
};

use crate::http::{
    middleware::principal_from_headers,
    models::*,
    session::session_token,
    state::AppState,
};

/// Where the admin settings page is mounted.
pub const ADMIN_PAGE_PATH: &str = "/admin/stoplist";

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            ADMIN_PAGE_PATH,
            get(admin_page_handler).post(admin_update_handler),
        )
        .route("/api/v1/save", post(save_handler))
        .route("/api/v1/settings", get(settings_handler))
        .with_state(state)
}

/// GET /admin/stoplist - settings form with a fresh nonce
async fn admin_page_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AdminPageQuery>,
) -> Result<Response, HttpServerError> {
    state.record_request(ADMIN_PAGE_PATH);

    let principal = principal_from_headers(&headers, &state.config.admin, &state.admin_sessions);
    if !principal.can(MANAGE_OPTIONS) {
        state.record_error();
        return Err(AdminError::Unauthorized.into());
    }

    let settings = load_settings(&state).await?;
    let nonce = state.services.nonces.issue(NONCE_ACTION, &principal);
    let updated = query.updated.as_deref().is_some_and(|v| v == "true" || v == "1");
    let page = Html(render_admin_page(&settings, &nonce, updated));

    // The rendered form posts back without the bearer header.
    let has_session = session_token(&headers).is_some_and(|t| state.admin_sessions.is_valid(t));
    if has_session {
        return Ok(page.into_response());
    }
    let cookie = state.admin_sessions.cookie(&state.admin_sessions.issue());
    Ok(([(header::SET_COOKIE, cookie)], page).into_response())
}

/// POST /admin/stoplist - apply the submitted settings form
async fn admin_update_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AdminForm>,
) -> Result<Response, HttpServerError> {
    state.record_request(ADMIN_PAGE_PATH);

    let principal = principal_from_headers(&headers, &state.config.admin, &state.admin_sessions);
    let services = state.services.clone();
    let redirect_path = state.config.admin.redirect_path.clone();
    let redirect = blocking(&state, move || {
        update_options(
            &principal,
            form.nonce.as_deref(),
            &form.settings_form(),
            services.nonces.as_ref(),
            services.options.as_ref(),
            &redirect_path,
        )
        .map_err(HttpServerError::from)
    })
    .await?;

    let status = StatusCode::from_u16(redirect.status).unwrap_or(StatusCode::SEE_OTHER);
    Ok((status, [(header::LOCATION, redirect.location)]).into_response())
}

/// POST /api/v1/save - run one save event through the gate
async fn save_handler(
    State(state): State<AppState>,
    Json(event): Json<SaveEvent>,
) -> Result<Json<SaveResponse>, HttpServerError> {
    state.record_request("/api/v1/save");

    let gate = state.gate.clone();
    let content = state.services.content.clone();
    let (verdict, item) = blocking(&state, move || {
        let verdict = gate.check_post(&event)?;
        let item = ItemState::load(content.as_ref(), verdict.content_id())
            .map_err(|e| HttpServerError::Internal(format!("{e:#}")))?;
        Ok((verdict, item))
    })
    .await?;

    Ok(Json(SaveResponse {
        success: true,
        verdict,
        item,
    }))
}

/// GET /api/v1/settings - stored settings
async fn settings_handler(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, HttpServerError> {
    state.record_request("/api/v1/settings");
    let settings = load_settings(&state).await?;
    Ok(Json(SettingsResponse {
        success: true,
        settings: SettingsView::from(&settings),
    }))
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state
        .stats
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner);

    Json(HealthResponse {
        status: "healthy".into(),
        session_id: state.session_id.clone(),
        uptime_seconds: stats.uptime_seconds(),
        requests_handled: stats.requests_total,
        timestamp: Local::now().to_rfc3339(),
    })
}

/// Runs host and option-store calls off the async workers; both may touch disk.
async fn blocking<T, F>(state: &AppState, task: F) -> Result<T, HttpServerError>
where
    F: FnOnce() -> Result<T, HttpServerError> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| HttpServerError::Internal(format!("blocking task failed: {e}")))
        .and_then(|r| r);
    if result.is_err() {
        state.record_error();
    }
    result
}

async fn load_settings(state: &AppState) -> Result<StoplistSettings, HttpServerError> {
    let options = state.services.options.clone();
    blocking(state, move || {
        StoplistSettings::load(options.as_ref())
            .map_err(|e| HttpServerError::Internal(format!("failed to load options: {e:#}")))
    })
    .await
}

fn action_label(mode: ActionMode) -> &'static str {
    match mode {
        ActionMode::NoOp => "Nothing",
        ActionMode::Draft => "Draft",
        ActionMode::Private => "Private",
        ActionMode::Trash => "Trash",
    }
}

fn render_admin_page(settings: &StoplistSettings, nonce: &str, updated: bool) -> String {
    let options: String = ActionMode::ALL
        .iter()
        .map(|mode| {
            let selected = if *mode == settings.action { " selected" } else { "" };
            format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                mode.as_str(),
                action_label(*mode)
            )
        })
        .collect();
    let notice = if updated {
        r#"<div class="notice"><p>Settings saved.</p></div>"#
    } else {
        ""
    };

    format!(
        r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Stoplist Options</title></head>
<body>
<div class="wrap">
<h1>Stoplist</h1>
{notice}
<form method="post" action="{action_url}">
<input type="hidden" name="{nonce_field}" value="{nonce}">
<input type="hidden" name="action" value="{update_action}">
<table class="form-table"><tbody>
<tr><th scope="row">Change post status to</th>
<td><select name="stoplist[action]">{options}</select></td></tr>
<tr><th scope="row">Tags (one per line)</th>
<td><textarea rows="10" cols="50" name="stoplist[tags]">{tags}</textarea></td></tr>
</tbody></table>
<p class="submit"><input type="submit" value="Save Changes"></p>
</form>
</div>
</body>
</html>
"#,
        action_url = ADMIN_PAGE_PATH,
        nonce_field = NONCE_FIELD,
        nonce = escape_html(nonce),
        update_action = UPDATE_OPTIONS_ACTION,
        tags = escape_html(&settings.tags.join("\n")),
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
