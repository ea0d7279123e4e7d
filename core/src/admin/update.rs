use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::AdminError;
use crate::host::{NonceVerifier, OptionStore};
use crate::settings::{ActionMode, StoplistSettings};

use super::principal::{Principal, MANAGE_OPTIONS};

/// Form field carrying the request-forgery token.
pub const NONCE_FIELD: &str = "stoplist_nonce";
/// Action name nonces are issued for.
pub const NONCE_ACTION: &str = "stoplist";
/// Value of the form's `action` field for settings updates.
pub const UPDATE_OPTIONS_ACTION: &str = "stoplist_update_options";

/// Raw settings as submitted from the admin form. Missing fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub action: Option<String>,
    /// One tag per line.
    #[serde(default)]
    pub tags: Option<String>,
}

/// Where to send the administrator after a successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRedirect {
    pub location: String,
    pub status: u16,
}

impl SettingsRedirect {
    fn updated(base: &str) -> Self {
        let sep = if base.contains('?') { '&' } else { '?' };
        Self {
            location: format!("{base}{sep}page=stoplist&updated=true"),
            status: 303,
        }
    }
}

/// Merges a submitted form over the stored settings.
///
/// The action must be one of the persisted values after trimming, otherwise it
/// becomes `nothing`. Tags are split per line, trimmed, de-duplicated and
/// sorted; their case is kept as entered.
pub fn apply_settings_form(existing: &StoplistSettings, form: &SettingsForm) -> StoplistSettings {
    let action = match &form.action {
        Some(raw) => ActionMode::parse(raw.trim()).unwrap_or_else(|| {
            tracing::warn!(action = %raw, "rejected unknown action; storing nothing");
            ActionMode::NoOp
        }),
        None => existing.action,
    };

    let tags = match &form.tags {
        Some(text) => parse_tag_lines(text),
        None => existing.tags.clone(),
    };

    StoplistSettings { action, tags }
}

fn parse_tag_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Applies `form` and persists it without authorization checks.
///
/// For trusted local callers; HTTP requests go through [`update_options`].
pub fn save_settings(
    store: &dyn OptionStore,
    form: &SettingsForm,
) -> anyhow::Result<StoplistSettings> {
    let existing = StoplistSettings::load(store)?;
    let next = apply_settings_form(&existing, form);
    next.save(store)?;
    tracing::info!(action = %next.action, tags = next.tags.len(), "stoplist options updated");
    Ok(next)
}

/// Authorizes, validates the nonce, then merges and stores the submitted settings.
pub fn update_options(
    principal: &Principal,
    nonce: Option<&str>,
    form: &SettingsForm,
    verifier: &dyn NonceVerifier,
    store: &dyn OptionStore,
    redirect_base: &str,
) -> Result<SettingsRedirect, AdminError> {
    if !principal.can(MANAGE_OPTIONS) {
        tracing::warn!(login = %principal.login, "settings update without manage_options");
        return Err(AdminError::Unauthorized);
    }

    let Some(nonce) = nonce.filter(|n| !n.is_empty()) else {
        tracing::warn!(login = %principal.login, "settings update without nonce");
        return Err(AdminError::MissingNonce);
    };

    if !verifier.verify(nonce, NONCE_ACTION, principal) {
        tracing::warn!(login = %principal.login, "settings update with invalid nonce");
        return Err(AdminError::InvalidNonce);
    }

    save_settings(store, form).map_err(AdminError::Store)?;

    Ok(SettingsRedirect::updated(redirect_base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Store(Mutex<HashMap<String, Value>>);

    impl OptionStore for Store {
        fn get_option(&self, key: &str) -> anyhow::Result<Option<Value>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }
        fn set_option(&self, key: &str, value: Value) -> anyhow::Result<()> {
            self.0.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }
    }

    struct FixedNonce(&'static str);

    impl NonceVerifier for FixedNonce {
        fn issue(&self, _action: &str, _principal: &Principal) -> String {
            self.0.to_string()
        }
        fn verify(&self, token: &str, action: &str, _principal: &Principal) -> bool {
            token == self.0 && action == NONCE_ACTION
        }
    }

    fn form(action: Option<&str>, tags: Option<&str>) -> SettingsForm {
        SettingsForm {
            action: action.map(str::to_string),
            tags: tags.map(str::to_string),
        }
    }

    #[test]
    fn tags_are_split_trimmed_deduplicated_and_sorted() {
        let s = apply_settings_form(
            &StoplistSettings::default(),
            &form(Some("draft"), Some("spam\r\n  Casino \n\nspam\nalpha")),
        );
        assert_eq!(s.action, ActionMode::Draft);
        assert_eq!(s.tags, vec!["Casino", "alpha", "spam"]);
    }

    #[test]
    fn action_is_trimmed_and_validated() {
        let base = StoplistSettings::default();
        assert_eq!(apply_settings_form(&base, &form(Some(" trash "), None)).action, ActionMode::Trash);
        assert_eq!(apply_settings_form(&base, &form(Some("delete"), None)).action, ActionMode::NoOp);
    }

    #[test]
    fn missing_fields_keep_stored_values() {
        let existing = StoplistSettings {
            action: ActionMode::Private,
            tags: vec!["spam".into()],
        };
        assert_eq!(apply_settings_form(&existing, &form(None, None)), existing);
        let s = apply_settings_form(&existing, &form(None, Some("casino")));
        assert_eq!(s.action, ActionMode::Private);
        assert_eq!(s.tags, vec!["casino"]);
    }

    #[test]
    fn unauthorized_user_is_rejected_before_nonce_check() {
        let store = Store::default();
        let err = update_options(
            &Principal::new("editor"),
            None,
            &form(Some("trash"), Some("spam")),
            &FixedNonce("n"),
            &store,
            "/admin/stoplist",
        )
        .unwrap_err();
        assert!(matches!(err, AdminError::Unauthorized));
        assert_eq!(err.to_string(), "Unauthorized user");
        assert!(store.get_option(crate::settings::OPTION_KEY).unwrap().is_none());
    }

    #[test]
    fn missing_and_invalid_nonces_are_rejected() {
        let store = Store::default();
        let admin = Principal::administrator("admin");
        let f = form(Some("trash"), Some("spam"));

        let err = update_options(&admin, None, &f, &FixedNonce("n"), &store, "/x").unwrap_err();
        assert!(matches!(err, AdminError::MissingNonce));
        let err = update_options(&admin, Some(""), &f, &FixedNonce("n"), &store, "/x").unwrap_err();
        assert!(matches!(err, AdminError::MissingNonce));
        let err = update_options(&admin, Some("forged"), &f, &FixedNonce("n"), &store, "/x")
            .unwrap_err();
        assert!(matches!(err, AdminError::InvalidNonce));
        assert_eq!(err.to_string(), "Invalid nonce");
    }

    #[test]
    fn successful_update_persists_and_redirects() {
        let store = Store::default();
        let admin = Principal::administrator("admin");
        let redirect = update_options(
            &admin,
            Some("n"),
            &form(Some("trash"), Some("Spam\nspam")),
            &FixedNonce("n"),
            &store,
            "/admin/stoplist",
        )
        .unwrap();
        assert_eq!(
            redirect,
            SettingsRedirect {
                location: "/admin/stoplist?page=stoplist&updated=true".into(),
                status: 303,
            }
        );
        let saved = StoplistSettings::load(&store).unwrap();
        assert_eq!(saved.action, ActionMode::Trash);
        assert_eq!(saved.tags, vec!["Spam", "spam"]);
    }

    #[test]
    fn redirect_appends_to_existing_query() {
        assert_eq!(
            SettingsRedirect::updated("/wp-admin/options-general.php?x=1").location,
            "/wp-admin/options-general.php?x=1&page=stoplist&updated=true"
        );
    }
}
