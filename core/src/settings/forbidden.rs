use std::collections::BTreeSet;

use serde::Serialize;

use crate::moderation::normalize::normalize;

/// Normalized forbidden tags: lowercase, trimmed, unique, non-empty, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ForbiddenTagSet(BTreeSet<String>);

impl ForbiddenTagSet {
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(normalize(raw))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `tag` must already be normalized.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn intersects(&self, candidates: &BTreeSet<String>) -> bool {
        // Iterate the smaller side.
        if candidates.len() < self.0.len() {
            candidates.iter().any(|t| self.0.contains(t))
        } else {
            self.0.iter().any(|t| candidates.contains(t))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
