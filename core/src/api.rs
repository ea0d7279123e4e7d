//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `stoplist_core::api` instead of reaching into internal modules.

pub use crate::admin::{
    apply_settings_form, save_settings, update_options, Principal, SettingsForm,
    SettingsRedirect, MANAGE_OPTIONS, NONCE_ACTION, NONCE_FIELD, UPDATE_OPTIONS_ACTION,
};
pub use crate::config::{
    load_default, load_from_path, AdminConfig, AppConfig, ContentConfig, HttpServerConfig,
    JsonFileOptionsConfig, LoggingConfig, ModerationConfig, OptionsProvider,
};
pub use crate::context::{AppContext, Services, ServicesFactory};
pub use crate::error::{AdminError, CliError, ModerationError};
pub use crate::event::{FormPayload, SaveEvent};
pub use crate::host::{
    ContentHost, ContentId, HookId, HookRegistry, NonceVerifier, OptionStore, PostStatus, SaveHook,
};
pub use crate::moderation::{
    register, SkipReason, StoplistGate, TriggerRegistration, Verdict, CHECK_POST_HOOK,
};
pub use crate::settings::{ActionMode, ForbiddenTagSet, StoplistSettings, OPTION_KEY};
