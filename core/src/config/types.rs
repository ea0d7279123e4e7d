use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::host::PostStatus;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub moderation: ModerationConfig,

    #[serde(default)]
    pub options: OptionsProvider,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub http_server: HttpServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "stoplist_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Statuses an item must currently have for a save to be evaluated.
    #[serde(default = "default_allowed_statuses")]
    pub allowed_statuses: HashSet<PostStatus>,

    /// Taxonomy whose raw form input carries newly typed tags.
    #[serde(default = "default_tag_taxonomy")]
    pub tag_taxonomy: String,
}

fn default_allowed_statuses() -> HashSet<PostStatus> {
    [PostStatus::Inherit, PostStatus::Future, PostStatus::Publish]
        .into_iter()
        .collect()
}

fn default_tag_taxonomy() -> String {
    "post_tag".to_string()
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            allowed_statuses: default_allowed_statuses(),
            tag_taxonomy: default_tag_taxonomy(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum OptionsProvider {
    #[serde(rename = "json_file")]
    JsonFile(JsonFileOptionsConfig),
    #[serde(rename = "memory")]
    Memory,
}

pub(crate) const DEFAULT_OPTIONS_FILE: &str = "./options.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonFileOptionsConfig {
    #[serde(default = "default_options_path")]
    pub path: String,
}

fn default_options_path() -> String {
    DEFAULT_OPTIONS_FILE.to_string()
}

impl Default for JsonFileOptionsConfig {
    fn default() -> Self {
        Self {
            path: default_options_path(),
        }
    }
}

impl Default for OptionsProvider {
    fn default() -> Self {
        OptionsProvider::JsonFile(JsonFileOptionsConfig::default())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// JSON file of content items loaded into the in-memory host at startup.
    #[serde(default)]
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Bearer token granting the `manage_options` capability. Admin routes are
    /// closed when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_nonce_ttl_secs")]
    pub nonce_ttl_secs: u64,

    /// Where a successful settings update redirects to.
    #[serde(default = "default_redirect_path")]
    pub redirect_path: String,
}

fn default_nonce_ttl_secs() -> u64 {
    86_400
}

fn default_redirect_path() -> String {
    "/admin/stoplist".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            nonce_ttl_secs: default_nonce_ttl_secs(),
            redirect_path: default_redirect_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_http_host")]
    pub host: String,

    #[serde(default = "default_http_port")]
    pub port: u16,
}

fn default_http_host() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    8080
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_http_host(),
            port: default_http_port(),
        }
    }
}
