use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use stoplist_core::api::{AppConfig, NonceVerifier, OptionStore, OptionsProvider};

use crate::host::InMemoryHost;
use crate::nonce::TokenNonceStore;
use crate::options::{JsonFileOptionStore, MemoryOptionStore};

pub fn build_options(cfg: &AppConfig) -> Arc<dyn OptionStore> {
    match &cfg.options {
        OptionsProvider::JsonFile(file_cfg) => Arc::new(JsonFileOptionStore::new(&file_cfg.path)),
        OptionsProvider::Memory => Arc::new(MemoryOptionStore::new()),
    }
}

/// Seeds the host from `content.seed_path` when set.
pub fn build_content(cfg: &AppConfig) -> Result<Arc<InMemoryHost>> {
    match cfg.content.seed_path.as_deref() {
        Some(path) if !path.trim().is_empty() => {
            Ok(Arc::new(InMemoryHost::from_seed_file(Path::new(path))?))
        }
        _ => Ok(Arc::new(InMemoryHost::new())),
    }
}

pub fn build_nonces(cfg: &AppConfig) -> Arc<dyn NonceVerifier> {
    Arc::new(TokenNonceStore::new(cfg.admin.nonce_ttl_secs))
}
