//! In-process content host.
//!
//! Keeps items in memory and dispatches save hooks the way a CMS does: after
//! every save, and again from inside its own status mutations.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use stoplist_core::api::{
    ContentHost, ContentId, FormPayload, HookId, HookRegistry, PostStatus, SaveEvent, SaveHook,
    TriggerRegistration,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub status: PostStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Set on revisions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_parent: Option<ContentId>,
}

#[derive(Default)]
pub struct InMemoryHost {
    items: RwLock<BTreeMap<ContentId, ContentItem>>,
    // Weak: hooks usually hold the host through their services.
    hooks: Mutex<Vec<Weak<dyn SaveHook>>>,
    triggers: TriggerRegistration,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = ContentItem>) -> Self {
        let host = Self::new();
        for item in items {
            host.insert(item);
        }
        host
    }

    /// Loads a JSON array of items.
    pub fn from_seed_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read content seed {}", path.display()))?;
        let items: Vec<ContentItem> = serde_json::from_str(&raw)
            .with_context(|| format!("invalid content seed {}", path.display()))?;
        tracing::debug!(path = %path.display(), items = items.len(), "content seeded");
        Ok(Self::with_items(items))
    }

    pub fn insert(&self, item: ContentItem) {
        self.items_mut().insert(item.id, item);
    }

    pub fn item(&self, id: ContentId) -> Option<ContentItem> {
        self.items().get(&id).cloned()
    }

    pub fn snapshot(&self) -> Vec<ContentItem> {
        self.items().values().cloned().collect()
    }

    /// Stores `item` and fires the save hooks with the submitted form.
    pub fn save(&self, item: ContentItem, payload: Option<FormPayload>) -> Result<()> {
        let id = item.id;
        self.insert(item);
        self.fire_save(&SaveEvent::new(id, payload))
    }

    /// Invokes every attached hook for `event`, stopping at the first error.
    pub fn fire_save(&self, event: &SaveEvent) -> Result<()> {
        for hook in self.live_hooks() {
            let id = hook.id();
            if !self.triggers.is_attached(id, event.content_id) {
                tracing::trace!(hook = %id, content_id = %event.content_id, "hook detached; skipped");
                continue;
            }
            hook.on_save(event)
                .with_context(|| format!("save hook {id} failed"))?;
        }
        Ok(())
    }

    fn live_hooks(&self) -> Vec<Arc<dyn SaveHook>> {
        let mut hooks = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
        hooks.retain(|h| h.strong_count() > 0);
        hooks.iter().filter_map(Weak::upgrade).collect()
    }

    fn set_status(&self, id: ContentId, status: PostStatus) -> Result<()> {
        {
            let mut items = self.items_mut();
            let item = items
                .get_mut(&id)
                .ok_or_else(|| anyhow::anyhow!("content item {id} not found"))?;
            item.status = status;
        }
        // Lock released: hooks read the item back.
        self.fire_save(&SaveEvent::programmatic(id))
    }

    fn items(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<ContentId, ContentItem>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn items_mut(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<ContentId, ContentItem>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ContentHost for InMemoryHost {
    fn name(&self) -> &str {
        "memory"
    }

    fn status(&self, id: ContentId) -> Result<Option<PostStatus>> {
        Ok(self.items().get(&id).map(|i| i.status.clone()))
    }

    fn tags(&self, id: ContentId) -> Result<Vec<String>> {
        Ok(self
            .items()
            .get(&id)
            .map(|i| i.tags.clone())
            .unwrap_or_default())
    }

    fn revision_parent(&self, id: ContentId) -> Result<Option<ContentId>> {
        Ok(self.items().get(&id).and_then(|i| i.revision_parent))
    }

    fn update_status(&self, id: ContentId, status: PostStatus) -> Result<()> {
        tracing::debug!(content_id = %id, status = %status, "updating status");
        self.set_status(id, status)
    }

    fn move_to_trash(&self, id: ContentId) -> Result<()> {
        tracing::debug!(content_id = %id, "moving to trash");
        self.set_status(id, PostStatus::Trash)
    }
}

impl HookRegistry for InMemoryHost {
    fn on_before_save(&self, hook: Arc<dyn SaveHook>) {
        tracing::debug!(hook = %hook.id(), "save hook registered");
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::downgrade(&hook));
    }

    fn attach(&self, hook: HookId, content_id: ContentId) {
        self.triggers.attach(hook, content_id)
    }

    fn detach(&self, hook: HookId, content_id: ContentId) {
        self.triggers.detach(hook, content_id)
    }

    fn is_attached(&self, hook: HookId, content_id: ContentId) -> bool {
        self.triggers.is_attached(hook, content_id)
    }
}
