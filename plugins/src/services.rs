//! ServicesFactory implementation: builds the host, option store and nonce
//! store from config so the CLI and the HTTP server share one wiring.
use stoplist_core::api::{AppConfig, CliError, Services, ServicesFactory};

use crate::factory;

pub struct PluginServicesFactory;

impl Default for PluginServicesFactory {
    fn default() -> Self {
        Self
    }
}

impl ServicesFactory for PluginServicesFactory {
    fn build_services(&self, cfg: &AppConfig) -> Result<Services, CliError> {
        let host = factory::build_content(cfg)
            .map_err(|e| CliError::Config(format!("content host: {e:#}")))?;
        Ok(Services {
            content: host.clone(),
            hooks: host,
            options: factory::build_options(cfg),
            nonces: factory::build_nonces(cfg),
        })
    }
}
