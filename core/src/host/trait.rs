use std::sync::Arc;

use serde_json::Value;

use crate::admin::Principal;
use crate::event::SaveEvent;

use super::types::{ContentId, HookId, PostStatus};

/// Read and mutation accessors the content host exposes to the gate.
pub trait ContentHost: Send + Sync {
    fn name(&self) -> &str;

    /// `None` when the host has no item with this id.
    fn status(&self, id: ContentId) -> anyhow::Result<Option<PostStatus>>;

    fn tags(&self, id: ContentId) -> anyhow::Result<Vec<String>>;

    /// Parent item id when `id` is a revision.
    fn revision_parent(&self, id: ContentId) -> anyhow::Result<Option<ContentId>>;

    fn update_status(&self, id: ContentId, status: PostStatus) -> anyhow::Result<()>;

    fn move_to_trash(&self, id: ContentId) -> anyhow::Result<()>;
}

/// A listener invoked by the host before a save completes.
pub trait SaveHook: Send + Sync {
    fn id(&self) -> HookId;

    fn on_save(&self, event: &SaveEvent) -> anyhow::Result<()>;
}

/// Save-event subscription primitives.
///
/// `detach`/`attach` toggle whether an already registered hook fires for saves
/// of one content item; they do not unregister it, and saves of other items
/// still reach it.
pub trait HookRegistry: Send + Sync {
    fn on_before_save(&self, hook: Arc<dyn SaveHook>);

    fn attach(&self, hook: HookId, content_id: ContentId);

    fn detach(&self, hook: HookId, content_id: ContentId);

    fn is_attached(&self, hook: HookId, content_id: ContentId) -> bool;
}

/// Persisted key-value settings.
pub trait OptionStore: Send + Sync {
    fn get_option(&self, key: &str) -> anyhow::Result<Option<Value>>;

    fn set_option(&self, key: &str, value: Value) -> anyhow::Result<()>;
}

/// Issues and checks request-forgery tokens for admin actions.
pub trait NonceVerifier: Send + Sync {
    fn issue(&self, action: &str, principal: &Principal) -> String;

    fn verify(&self, token: &str, action: &str, principal: &Principal) -> bool;
}
