//! Administrator settings updates: authorization, nonce check, coercion, persistence.

mod principal;
mod update;

pub use principal::{Principal, MANAGE_OPTIONS};
pub use update::{
    apply_settings_form, save_settings, update_options, SettingsForm, SettingsRedirect,
    NONCE_ACTION, NONCE_FIELD, UPDATE_OPTIONS_ACTION,
};
