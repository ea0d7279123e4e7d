use std::fmt;

use serde::{Serialize, Serializer};

use crate::host::PostStatus;

/// Remediation applied to an item carrying a forbidden tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionMode {
    #[default]
    NoOp,
    Draft,
    Private,
    Trash,
}

/// State change an [`ActionMode`] asks the host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    SetStatus(PostStatus),
    MoveToTrash,
}

impl ActionMode {
    pub const ALL: [ActionMode; 4] = [
        ActionMode::NoOp,
        ActionMode::Draft,
        ActionMode::Private,
        ActionMode::Trash,
    ];

    /// Persisted form.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionMode::NoOp => "nothing",
            ActionMode::Draft => "draft",
            ActionMode::Private => "private",
            ActionMode::Trash => "trash",
        }
    }

    /// Reads a persisted value. Anything unrecognized resolves to `NoOp`.
    pub fn from_persisted(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }

    /// Strict parse; `None` for values outside the persisted vocabulary.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == raw)
    }

    pub fn transition(self) -> Option<Transition> {
        match self {
            ActionMode::NoOp => None,
            ActionMode::Draft => Some(Transition::SetStatus(PostStatus::Draft)),
            ActionMode::Private => Some(Transition::SetStatus(PostStatus::Private)),
            ActionMode::Trash => Some(Transition::MoveToTrash),
        }
    }
}

impl fmt::Display for ActionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActionMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
