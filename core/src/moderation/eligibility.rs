//! Decides whether a save event is worth evaluating at all.

use std::collections::HashSet;

use crate::event::SaveEvent;
use crate::host::PostStatus;

use super::verdict::SkipReason;

/// Gating applied before any tag lookup. Pure over the event and the current status.
pub fn check_eligibility(
    allowed: &HashSet<PostStatus>,
    status: Option<&PostStatus>,
    event: &SaveEvent,
) -> Result<(), SkipReason> {
    let Some(status) = status else {
        return Err(SkipReason::MissingStatus);
    };
    if !allowed.contains(status) {
        return Err(SkipReason::StatusNotAllowed(status.clone()));
    }

    let Some(payload) = event.submitted() else {
        return Err(SkipReason::NoPayload);
    };
    if payload.is_autosave() {
        return Err(SkipReason::Autosave);
    }

    Ok(())
}
