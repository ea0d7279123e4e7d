//! Forbidden-tag membership checks.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::settings::ForbiddenTagSet;

use super::normalize::{normalize, split_tag_input};

/// Which source of tags produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    Assigned,
    Submitted,
}

/// Checks already-assigned tags first, then the raw submitted tag input.
///
/// Short-circuits on the assigned tags; the submitted input is only split
/// when nothing assigned matched.
pub fn find_forbidden<S: AsRef<str>>(
    forbidden: &ForbiddenTagSet,
    assigned: &[S],
    submitted: Option<&str>,
) -> Option<MatchSource> {
    if forbidden.is_empty() {
        return None;
    }

    if forbidden.intersects(&normalize(assigned)) {
        return Some(MatchSource::Assigned);
    }

    let incoming: BTreeSet<String> = submitted.map(split_tag_input).unwrap_or_default();
    if forbidden.intersects(&incoming) {
        return Some(MatchSource::Submitted);
    }

    None
}
