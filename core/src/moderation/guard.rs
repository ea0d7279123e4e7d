//! Re-entrancy guard around the gate's own mutations.
//!
//! The host fires save hooks from inside `update_status`/`move_to_trash`, so the
//! remediation step would re-enter the gate. The hook is detached for the item
//! being mutated, for the duration of the mutation, and re-attached on every
//! exit path. Saves of other items keep reaching the hook meanwhile.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::host::{ContentId, HookId, HookRegistry};

/// Armed/disarmed state of hooks for one host, per content item.
///
/// Detaches nest: a hook fires again for an item only once every detach has
/// been matched by an attach.
#[derive(Debug, Default)]
pub struct TriggerRegistration {
    detached: Mutex<HashMap<(HookId, ContentId), usize>>,
}

impl TriggerRegistration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detach(&self, hook: HookId, content_id: ContentId) {
        let mut detached = self.detached.lock().unwrap_or_else(PoisonError::into_inner);
        *detached.entry((hook, content_id)).or_insert(0) += 1;
    }

    pub fn attach(&self, hook: HookId, content_id: ContentId) {
        let mut detached = self.detached.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(depth) = detached.get_mut(&(hook, content_id)) {
            *depth -= 1;
            if *depth == 0 {
                detached.remove(&(hook, content_id));
            }
        }
    }

    pub fn is_attached(&self, hook: HookId, content_id: ContentId) -> bool {
        let detached = self.detached.lock().unwrap_or_else(PoisonError::into_inner);
        !detached.contains_key(&(hook, content_id))
    }
}

/// Keeps `hook` detached for one item until dropped.
#[must_use = "the hook is re-attached as soon as the guard is dropped"]
pub struct HookGuard<'a> {
    registry: &'a dyn HookRegistry,
    hook: HookId,
    content_id: ContentId,
}

impl<'a> HookGuard<'a> {
    pub fn disarm(registry: &'a dyn HookRegistry, hook: HookId, content_id: ContentId) -> Self {
        registry.detach(hook, content_id);
        tracing::trace!(hook = %hook, content_id = %content_id, "save hook detached");
        Self {
            registry,
            hook,
            content_id,
        }
    }
}

impl Drop for HookGuard<'_> {
    fn drop(&mut self) {
        // Runs on normal return, `?` early exit and panic unwinding alike.
        self.registry.attach(self.hook, self.content_id);
        tracing::trace!(hook = %self.hook, content_id = %self.content_id, "save hook re-attached");
    }
}

/// Runs `f` with `hook` detached from `registry` for saves of `content_id`.
pub fn with_listener_disarmed<T>(
    registry: &dyn HookRegistry,
    hook: HookId,
    content_id: ContentId,
    f: impl FnOnce() -> T,
) -> T {
    let _guard = HookGuard::disarm(registry, hook, content_id);
    f()
}
