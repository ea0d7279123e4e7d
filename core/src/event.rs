//! Save events as delivered by the host.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::host::ContentId;

/// One save of one content item. Lives only for the duration of an evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEvent {
    pub content_id: ContentId,
    /// Raw submitted form; `None` for programmatic saves.
    #[serde(default)]
    pub payload: Option<FormPayload>,
}

impl SaveEvent {
    pub fn new(content_id: impl Into<ContentId>, payload: Option<FormPayload>) -> Self {
        Self {
            content_id: content_id.into(),
            payload,
        }
    }

    /// A save with no submitted form, as issued by the host's own mutation calls.
    pub fn programmatic(content_id: impl Into<ContentId>) -> Self {
        Self::new(content_id, None)
    }

    /// The payload, treating an empty submission like a missing one.
    pub fn submitted(&self) -> Option<&FormPayload> {
        self.payload.as_ref().filter(|p| !p.is_empty())
    }
}

/// Loosely typed form submission, read through typed accessors only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormPayload(Map<String, Value>);

impl FormPayload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Builds a payload from any JSON value; non-objects become an empty form.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the editor flagged this submission as an autosave (`data.wp_autosave`).
    pub fn is_autosave(&self) -> bool {
        self.0
            .get("data")
            .filter(|d| is_filled(d))
            .and_then(|d| d.get("wp_autosave"))
            .map(is_filled)
            .unwrap_or(false)
    }

    /// Raw comma-delimited tag input for `taxonomy` (`tax_input.<taxonomy>`), if non-empty.
    ///
    /// Array submissions are joined with commas so they split the same way.
    pub fn taxonomy_input(&self, taxonomy: &str) -> Option<String> {
        let raw = self.0.get("tax_input")?.get(taxonomy)?;
        if !is_filled(raw) {
            return None;
        }
        match raw {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            _ => None,
        }
    }
}

// Form values arrive untyped; "", "0", 0, false, null and empty containers count as unset.
fn is_filled(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|x| x != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> FormPayload {
        FormPayload::from_value(v)
    }

    #[test]
    fn autosave_flag_requires_non_empty_value() {
        assert!(payload(json!({"data": {"wp_autosave": {"post_id": 1}}})).is_autosave());
        assert!(payload(json!({"data": {"wp_autosave": "1"}})).is_autosave());
        assert!(!payload(json!({"data": {"wp_autosave": "0"}})).is_autosave());
        assert!(!payload(json!({"data": {}})).is_autosave());
        assert!(!payload(json!({"post_title": "x"})).is_autosave());
    }

    #[test]
    fn taxonomy_input_reads_string_and_array_forms() {
        let p = payload(json!({"tax_input": {"post_tag": "News,Spam"}}));
        assert_eq!(p.taxonomy_input("post_tag").as_deref(), Some("News,Spam"));
        assert_eq!(p.taxonomy_input("category"), None);

        let p = payload(json!({"tax_input": {"post_tag": ["a", "b"]}}));
        assert_eq!(p.taxonomy_input("post_tag").as_deref(), Some("a,b"));

        let p = payload(json!({"tax_input": {"post_tag": ""}}));
        assert_eq!(p.taxonomy_input("post_tag"), None);
    }

    #[test]
    fn empty_payload_counts_as_absent() {
        let ev = SaveEvent::new(7, Some(FormPayload::default()));
        assert!(ev.submitted().is_none());
        assert!(SaveEvent::programmatic(7).submitted().is_none());

        let ev = SaveEvent::new(7, Some(payload(json!({"post_title": "x"}))));
        assert!(ev.submitted().is_some());
    }

    #[test]
    fn non_object_value_becomes_empty_form() {
        assert!(FormPayload::from_value(json!(["x"])).is_empty());
    }
}
