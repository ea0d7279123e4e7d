//! Maps the configured action mode onto a host mutation.

use crate::host::{ContentHost, ContentId, HookId, HookRegistry};
use crate::settings::{ActionMode, Transition};

use super::guard::with_listener_disarmed;

/// Applies `mode` to `id` with `hook` detached for saves of `id` during the call.
///
/// Host failures are returned unchanged and not retried; the hook is
/// re-attached either way.
pub fn apply_action(
    host: &dyn ContentHost,
    hooks: &dyn HookRegistry,
    hook: HookId,
    id: ContentId,
    mode: ActionMode,
) -> anyhow::Result<Option<Transition>> {
    with_listener_disarmed(hooks, hook, id, || {
        let transition = mode.transition();
        match &transition {
            None => {}
            Some(Transition::SetStatus(status)) => host.update_status(id, status.clone())?,
            Some(Transition::MoveToTrash) => host.move_to_trash(id)?,
        }
        Ok(transition)
    })
}
