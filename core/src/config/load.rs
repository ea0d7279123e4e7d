use std::path::{Path, PathBuf};

use super::types::{AppConfig, OptionsProvider, DEFAULT_OPTIONS_FILE};

/// Get the default stoplist data directory: ~/.stoplist
pub fn get_stoplist_data_dir() -> anyhow::Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".stoplist"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.stoplist/config.toml
    let data_dir = get_stoplist_data_dir()?;
    let home_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg = if home_config.exists() {
        load_from_path(&home_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    // Keep the default options file under the data directory.
    if let OptionsProvider::JsonFile(ref mut file_cfg) = cfg.options {
        if file_cfg.path == DEFAULT_OPTIONS_FILE {
            std::fs::create_dir_all(&data_dir)?;
            file_cfg.path = data_dir.join("options.json").to_string_lossy().to_string();
        }
    }

    apply_env_overrides(&mut cfg)?;

    Ok(cfg)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    Ok(toml::from_str::<AppConfig>(&s)?)
}

// Environment variable overrides (Priority 0: highest)
fn apply_env_overrides(cfg: &mut AppConfig) -> anyhow::Result<()> {
    if let Some(v) = non_empty_env("STOPLIST_OPTIONS_PATH") {
        match cfg.options {
            OptionsProvider::JsonFile(ref mut file_cfg) => file_cfg.path = v,
            OptionsProvider::Memory => {
                tracing::warn!("STOPLIST_OPTIONS_PATH ignored: options provider is memory");
            }
        }
    }
    if let Some(v) = non_empty_env("STOPLIST_ADMIN_API_KEY") {
        cfg.admin.api_key = Some(v);
    }
    if let Some(v) = non_empty_env("STOPLIST_HTTP_PORT") {
        cfg.http_server.port = v
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid STOPLIST_HTTP_PORT {v:?}: {e}"))?;
    }
    Ok(())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
