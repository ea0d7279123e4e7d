//! Administrator settings: the forbidden-tag list and the action mode.

mod action_mode;
mod forbidden;

use serde::Serialize;
use serde_json::{json, Value};

use crate::host::OptionStore;

pub use action_mode::{ActionMode, Transition};
pub use forbidden::ForbiddenTagSet;

/// Option key the settings are persisted under.
pub const OPTION_KEY: &str = "stoplist_options";

/// Stored settings, coerced from whatever shape the option store returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoplistSettings {
    pub action: ActionMode,
    /// Tags as the administrator entered them; see [`Self::forbidden_tags`].
    pub tags: Vec<String>,
}

impl StoplistSettings {
    pub fn load(store: &dyn OptionStore) -> anyhow::Result<Self> {
        let raw = store.get_option(OPTION_KEY)?;
        Ok(raw.map(Self::from_value).unwrap_or_default())
    }

    pub fn save(&self, store: &dyn OptionStore) -> anyhow::Result<()> {
        store.set_option(OPTION_KEY, self.to_value())
    }

    /// Coerces a persisted value. Unknown shapes resolve to defaults rather than errors.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(map) = value else {
            tracing::warn!("stoplist options are not an object; using defaults");
            return Self::default();
        };

        let action = match map.get("action") {
            Some(Value::String(s)) => {
                let mode = ActionMode::from_persisted(s);
                if mode == ActionMode::NoOp && s != ActionMode::NoOp.as_str() {
                    tracing::warn!(action = %s, "unrecognized action in stored options; using nothing");
                }
                mode
            }
            Some(other) => {
                tracing::warn!(action = %other, "non-string action in stored options; using nothing");
                ActionMode::NoOp
            }
            None => ActionMode::NoOp,
        };

        let tags = match map.get("tags") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };

        Self { action, tags }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "action": self.action.as_str(),
            "tags": self.tags,
        })
    }

    pub fn forbidden_tags(&self) -> ForbiddenTagSet {
        ForbiddenTagSet::from_raw(&self.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn coerces_well_formed_options() {
        let s = StoplistSettings::from_value(json!({"action": "trash", "tags": ["Spam", "casino"]}));
        assert_eq!(s.action, ActionMode::Trash);
        assert_eq!(s.tags, vec!["Spam".to_string(), "casino".to_string()]);
        assert_eq!(
            s.forbidden_tags().iter().collect::<Vec<_>>(),
            vec!["casino", "spam"]
        );
    }

    #[test]
    fn unknown_action_values_resolve_to_noop() {
        for action in [json!("erase"), json!(3), json!(null), json!({"x": 1}), json!("Draft")] {
            let s = StoplistSettings::from_value(json!({"action": action, "tags": []}));
            assert_eq!(s.action, ActionMode::NoOp);
        }
    }

    #[test]
    fn malformed_shapes_fall_back_to_defaults() {
        assert_eq!(StoplistSettings::from_value(json!("junk")), StoplistSettings::default());
        let s = StoplistSettings::from_value(json!({"action": "draft", "tags": "spam"}));
        assert_eq!(s.action, ActionMode::Draft);
        assert!(s.tags.is_empty());
        let s = StoplistSettings::from_value(json!({"tags": ["ok", 5, null]}));
        assert_eq!(s.tags, vec!["ok".to_string()]);
    }

    #[test]
    fn value_form_matches_persisted_schema() {
        let s = StoplistSettings {
            action: ActionMode::Private,
            tags: vec!["a".into()],
        };
        assert_eq!(s.to_value(), json!({"action": "private", "tags": ["a"]}));
        assert_eq!(StoplistSettings::from_value(s.to_value()), s);
    }
}
