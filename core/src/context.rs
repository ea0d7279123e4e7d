use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::CliError;
use crate::host::{ContentHost, HookRegistry, NonceVerifier, OptionStore};

/// Host collaborators the gate and the admin surface depend on.
///
/// `content` and `hooks` are usually the same host object behind two views.
#[derive(Clone)]
pub struct Services {
    pub content: Arc<dyn ContentHost>,
    pub hooks: Arc<dyn HookRegistry>,
    pub options: Arc<dyn OptionStore>,
    pub nonces: Arc<dyn NonceVerifier>,
}

pub trait ServicesFactory: Send + Sync {
    fn build_services(&self, cfg: &AppConfig) -> Result<Services, CliError>;
}

#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    services_factory: Option<Arc<dyn ServicesFactory>>,
}

impl AppContext {
    pub fn new(cfg: AppConfig, services_factory: Option<Arc<dyn ServicesFactory>>) -> Self {
        Self {
            cfg,
            services_factory,
        }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn with_config(&self, cfg: AppConfig) -> Self {
        Self {
            cfg,
            services_factory: self.services_factory.clone(),
        }
    }

    pub fn build_services(&self) -> Result<Services, CliError> {
        let Some(factory) = self.services_factory.as_ref() else {
            return Err(CliError::Config(
                "services_factory missing (cannot build host services)".into(),
            ));
        };
        factory.build_services(&self.cfg)
    }
}
