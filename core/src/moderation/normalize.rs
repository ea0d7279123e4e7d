//! Case folding and de-duplication of tag lists.

use std::collections::BTreeSet;

/// Lowercases, trims, de-duplicates and drops empty tags.
///
/// Applied identically to forbidden tags and to incoming candidates so the
/// comparison is symmetric.
pub fn normalize<I, S>(raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Splits the editor's comma-delimited tag input and normalizes it.
pub fn split_tag_input(raw: &str) -> BTreeSet<String> {
    normalize(raw.split(','))
}
