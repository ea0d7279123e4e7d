#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use serde_json::{json, Value};
use stoplist_core::api::{
    ContentHost, ContentId, FormPayload, HookId, HookRegistry, ModerationConfig, NonceVerifier,
    OptionStore, PostStatus, Principal, SaveEvent, SaveHook, Services, StoplistGate,
    TriggerRegistration, OPTION_KEY,
};

#[derive(Debug, Clone)]
pub struct Item {
    pub status: PostStatus,
    pub tags: Vec<String>,
    pub parent: Option<ContentId>,
}

/// Host double that re-fires attached save hooks from its own mutations.
#[derive(Default)]
pub struct FakeHost {
    items: Mutex<HashMap<ContentId, Item>>,
    hooks: Mutex<Vec<Weak<dyn SaveHook>>>,
    triggers: TriggerRegistration,
    pub mutations: Mutex<Vec<String>>,
    pub dispatched: Mutex<Vec<ContentId>>,
    pub fail_mutations: Mutex<bool>,
}

impl FakeHost {
    pub fn with_item(self, id: u64, status: &str, tags: &[&str]) -> Self {
        self.items.lock().unwrap().insert(
            ContentId(id),
            Item {
                status: PostStatus::from(status),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                parent: None,
            },
        );
        self
    }

    pub fn with_revision(self, id: u64, parent: u64) -> Self {
        self.items.lock().unwrap().insert(
            ContentId(id),
            Item {
                status: PostStatus::Inherit,
                tags: vec![],
                parent: Some(ContentId(parent)),
            },
        );
        self
    }

    pub fn item(&self, id: u64) -> Item {
        self.items.lock().unwrap()[&ContentId(id)].clone()
    }

    /// Fires the save hooks the way an editor submission would.
    pub fn save(&self, event: &SaveEvent) -> anyhow::Result<()> {
        self.dispatch(event)
    }

    fn dispatch(&self, event: &SaveEvent) -> anyhow::Result<()> {
        let hooks: Vec<Arc<dyn SaveHook>> = self
            .hooks
            .lock()
            .unwrap()
            .iter()
            .filter_map(Weak::upgrade)
            .collect();
        for hook in hooks {
            if self.triggers.is_attached(hook.id(), event.content_id) {
                self.dispatched.lock().unwrap().push(event.content_id);
                hook.on_save(event)?;
            }
        }
        Ok(())
    }

    fn mutate(&self, id: ContentId, status: PostStatus, label: String) -> anyhow::Result<()> {
        if *self.fail_mutations.lock().unwrap() {
            anyhow::bail!("database unavailable");
        }
        {
            let mut items = self.items.lock().unwrap();
            let item = items
                .get_mut(&id)
                .ok_or_else(|| anyhow::anyhow!("no item {id}"))?;
            item.status = status;
        }
        self.mutations.lock().unwrap().push(label);
        self.dispatch(&SaveEvent::programmatic(id))
    }
}

impl ContentHost for FakeHost {
    fn name(&self) -> &str {
        "fake"
    }

    fn status(&self, id: ContentId) -> anyhow::Result<Option<PostStatus>> {
        Ok(self.items.lock().unwrap().get(&id).map(|i| i.status.clone()))
    }

    fn tags(&self, id: ContentId) -> anyhow::Result<Vec<String>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .get(&id)
            .map(|i| i.tags.clone())
            .unwrap_or_default())
    }

    fn revision_parent(&self, id: ContentId) -> anyhow::Result<Option<ContentId>> {
        Ok(self.items.lock().unwrap().get(&id).and_then(|i| i.parent))
    }

    fn update_status(&self, id: ContentId, status: PostStatus) -> anyhow::Result<()> {
        let label = format!("status:{id}:{status}");
        self.mutate(id, status, label)
    }

    fn move_to_trash(&self, id: ContentId) -> anyhow::Result<()> {
        self.mutate(id, PostStatus::Trash, format!("trash:{id}"))
    }
}

impl HookRegistry for FakeHost {
    fn on_before_save(&self, hook: Arc<dyn SaveHook>) {
        self.hooks.lock().unwrap().push(Arc::downgrade(&hook));
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

#[derive(Default)]
pub struct MapStore(Mutex<HashMap<String, Value>>);

impl MapStore {
    pub fn with_settings(action: &str, tags: &[&str]) -> Self {
        let store = Self::default();
        store
            .set_option(OPTION_KEY, json!({"action": action, "tags": tags}))
            .unwrap();
        store
    }
}

impl OptionStore for MapStore {
    fn get_option(&self, key: &str) -> anyhow::Result<Option<Value>> {
        Ok(self.0.lock().unwrap().get(key).cloned())
    }

    fn set_option(&self, key: &str, value: Value) -> anyhow::Result<()> {
        self.0.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}

pub struct NoNonces;

impl NonceVerifier for NoNonces {
    fn issue(&self, _action: &str, _principal: &Principal) -> String {
        String::new()
    }

    fn verify(&self, _token: &str, _action: &str, _principal: &Principal) -> bool {
        false
    }
}

pub fn gate(host: &Arc<FakeHost>, store: MapStore) -> Arc<StoplistGate> {
    let services = Services {
        content: host.clone(),
        hooks: host.clone(),
        options: Arc::new(store),
        nonces: Arc::new(NoNonces),
    };
    Arc::new(StoplistGate::new(services, ModerationConfig::default()))
}

pub fn editor_save(id: u64, new_tags: &str) -> SaveEvent {
    SaveEvent::new(
        id,
        Some(FormPayload::from_value(json!({
            "post_title": "Hello",
            "tax_input": {"post_tag": new_tags},
        }))),
    )
}
