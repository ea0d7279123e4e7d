use serde::Serialize;

use crate::host::{ContentId, PostStatus};
use crate::settings::ActionMode;

use super::matcher::MatchSource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "status", rename_all = "snake_case")]
pub enum SkipReason {
    MissingStatus,
    StatusNotAllowed(PostStatus),
    NoPayload,
    Autosave,
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Skipped {
        content_id: ContentId,
        skip: SkipReason,
    },
    Clean {
        content_id: ContentId,
    },
    /// A forbidden tag matched but the configured action changes nothing.
    Matched {
        content_id: ContentId,
        #[serde(rename = "matched_on")]
        source: MatchSource,
    },
    Remediated {
        content_id: ContentId,
        action: ActionMode,
        #[serde(rename = "matched_on")]
        source: MatchSource,
    },
}

impl Verdict {
    pub fn content_id(&self) -> ContentId {
        match self {
            Verdict::Skipped { content_id, .. }
            | Verdict::Clean { content_id }
            | Verdict::Matched { content_id, .. }
            | Verdict::Remediated { content_id, .. } => *content_id,
        }
    }

    pub fn is_remediated(&self) -> bool {
        matches!(self, Verdict::Remediated { .. })
    }
}
