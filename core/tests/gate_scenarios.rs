mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread;

use common::{editor_save, gate, FakeHost, MapStore};
use pretty_assertions::assert_eq;
use serde_json::json;
use stoplist_core::api::{
    register, ActionMode, ContentId, FormPayload, HookId, HookRegistry, PostStatus, SaveEvent,
    SaveHook, SkipReason, Verdict, CHECK_POST_HOOK,
};
use stoplist_core::moderation::MatchSource;

#[test]
fn submitted_forbidden_tag_moves_item_to_trash() {
    let host = Arc::new(FakeHost::default().with_item(1, "publish", &[]));
    let gate = gate(&host, MapStore::with_settings("trash", &["spam"]));

    let verdict = gate.check_post(&editor_save(1, "News,Spam,Tech")).unwrap();

    assert_eq!(
        verdict,
        Verdict::Remediated {
            content_id: ContentId(1),
            action: ActionMode::Trash,
            source: MatchSource::Submitted,
        }
    );
    assert_eq!(host.item(1).status, PostStatus::Trash);
    assert_eq!(*host.mutations.lock().unwrap(), vec!["trash:1".to_string()]);
}

#[test]
fn assigned_forbidden_tag_matches_without_submission() {
    let host = Arc::new(FakeHost::default().with_item(1, "publish", &["spam"]));
    let gate = gate(&host, MapStore::with_settings("draft", &["spam"]));

    assert!(gate.has_forbidden_tags(ContentId(1), &editor_save(1, "")).unwrap());
    let verdict = gate.check_post(&editor_save(1, "")).unwrap();

    assert!(matches!(
        verdict,
        Verdict::Remediated {
            source: MatchSource::Assigned,
            ..
        }
    ));
    assert_eq!(host.item(1).status, PostStatus::Draft);
}

#[test]
fn empty_forbidden_list_never_matches() {
    let host = Arc::new(FakeHost::default().with_item(1, "publish", &["spam", "casino"]));
    let gate = gate(&host, MapStore::with_settings("trash", &[]));

    let verdict = gate.check_post(&editor_save(1, "spam,casino")).unwrap();

    assert_eq!(verdict, Verdict::Clean { content_id: ContentId(1) });
    assert_eq!(host.item(1).status, PostStatus::Publish);
}

#[test]
fn missing_options_are_treated_as_no_match() {
    let host = Arc::new(FakeHost::default().with_item(1, "publish", &["spam"]));
    let gate = gate(&host, MapStore::default());

    let verdict = gate.check_post(&editor_save(1, "spam")).unwrap();

    assert_eq!(verdict, Verdict::Clean { content_id: ContentId(1) });
}

#[test]
fn revision_is_evaluated_through_its_parent() {
    let host = Arc::new(
        FakeHost::default()
            .with_item(42, "publish", &["spam"])
            .with_revision(43, 42),
    );
    let gate = gate(&host, MapStore::with_settings("private", &["spam"]));

    let verdict = gate.check_post(&editor_save(43, "")).unwrap();

    assert_eq!(verdict.content_id(), ContentId(42));
    assert_eq!(host.item(42).status, PostStatus::Private);
    assert_eq!(host.item(43).status, PostStatus::Inherit);
    assert_eq!(
        *host.mutations.lock().unwrap(),
        vec!["status:42:private".to_string()]
    );
}

#[test]
fn draft_item_is_left_alone() {
    let host = Arc::new(FakeHost::default().with_item(1, "draft", &["spam"]));
    let gate = gate(&host, MapStore::with_settings("trash", &["spam"]));

    let verdict = gate.check_post(&editor_save(1, "spam")).unwrap();

    assert_eq!(
        verdict,
        Verdict::Skipped {
            content_id: ContentId(1),
            skip: SkipReason::StatusNotAllowed(PostStatus::Draft),
        }
    );
    assert!(!gate.is_processable(ContentId(1), &editor_save(1, "spam")).unwrap());
    assert!(host.mutations.lock().unwrap().is_empty());
}

#[test]
fn autosave_is_ignored() {
    let host = Arc::new(FakeHost::default().with_item(1, "publish", &["spam"]));
    let gate = gate(&host, MapStore::with_settings("trash", &["spam"]));
    let event = SaveEvent::new(
        1,
        Some(FormPayload::from_value(json!({
            "data": {"wp_autosave": {"post_id": 1, "tax_input": {"post_tag": "spam"}}}
        }))),
    );

    let verdict = gate.check_post(&event).unwrap();

    assert!(matches!(
        verdict,
        Verdict::Skipped {
            skip: SkipReason::Autosave,
            ..
        }
    ));
    assert_eq!(host.item(1).status, PostStatus::Publish);
}

#[test]
fn programmatic_save_is_ignored() {
    let host = Arc::new(FakeHost::default().with_item(1, "publish", &["spam"]));
    let gate = gate(&host, MapStore::with_settings("trash", &["spam"]));

    let verdict = gate.check_post(&SaveEvent::programmatic(1)).unwrap();

    assert!(matches!(
        verdict,
        Verdict::Skipped {
            skip: SkipReason::NoPayload,
            ..
        }
    ));
}

#[test]
fn corrupted_action_resolves_to_noop() {
    let host = Arc::new(FakeHost::default().with_item(1, "future", &["spam"]));
    let gate = gate(&host, MapStore::with_settings("obliterate", &["SPAM"]));

    let verdict = gate.check_post(&editor_save(1, "")).unwrap();

    assert_eq!(
        verdict,
        Verdict::Matched {
            content_id: ContentId(1),
            source: MatchSource::Assigned,
        }
    );
    assert!(!verdict.is_remediated());
    assert_eq!(host.item(1).status, PostStatus::Future);
    assert!(host.mutations.lock().unwrap().is_empty());
}

#[test]
fn own_mutation_does_not_refire_the_gate() {
    let host = Arc::new(FakeHost::default().with_item(1, "publish", &[]));
    let gate = gate(&host, MapStore::with_settings("draft", &["spam"]));
    register(host.as_ref(), gate.clone());

    gate.check_post(&editor_save(1, "spam")).unwrap();

    assert!(host.dispatched.lock().unwrap().is_empty());
    assert!(host.is_attached(CHECK_POST_HOOK, ContentId(1)));
    assert_eq!(host.item(1).status, PostStatus::Draft);
}

#[test]
fn unguarded_mutation_would_refire_the_gate() {
    use stoplist_core::api::ContentHost;

    let host = Arc::new(FakeHost::default().with_item(1, "publish", &[]));
    let gate = gate(&host, MapStore::with_settings("draft", &["spam"]));
    register(host.as_ref(), gate.clone());

    host.update_status(ContentId(1), PostStatus::Private).unwrap();

    assert_eq!(*host.dispatched.lock().unwrap(), vec![ContentId(1)]);
}

#[test]
fn failed_mutation_propagates_and_rearms_hook() {
    let host = Arc::new(FakeHost::default().with_item(1, "publish", &["spam"]));
    let gate = gate(&host, MapStore::with_settings("trash", &["spam"]));
    register(host.as_ref(), gate.clone());
    *host.fail_mutations.lock().unwrap() = true;

    let err = gate.check_post(&editor_save(1, "")).unwrap_err();

    assert!(err.to_string().contains("database unavailable"));
    assert!(host.is_attached(CHECK_POST_HOOK, ContentId(1)));
    assert_eq!(host.item(1).status, PostStatus::Publish);
}

/// Saves item 2 from another thread while item 1 is being remediated.
struct SecondEditor {
    host: Weak<FakeHost>,
    fired: AtomicBool,
}

impl SaveHook for SecondEditor {
    fn id(&self) -> HookId {
        HookId("test.second_editor")
    }

    fn on_save(&self, event: &SaveEvent) -> anyhow::Result<()> {
        if event.content_id != ContentId(1) || self.fired.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let Some(host) = self.host.upgrade() else {
            return Ok(());
        };
        thread::spawn(move || host.save(&editor_save(2, "spam")))
            .join()
            .map_err(|_| anyhow::anyhow!("editor thread panicked"))?
    }
}

#[test]
fn save_of_other_item_during_remediation_is_still_moderated() {
    let host = Arc::new(
        FakeHost::default()
            .with_item(1, "publish", &[])
            .with_item(2, "publish", &[]),
    );
    let gate = gate(&host, MapStore::with_settings("trash", &["spam"]));
    register(host.as_ref(), gate.clone());
    let editor = Arc::new(SecondEditor {
        host: Arc::downgrade(&host),
        fired: AtomicBool::new(false),
    });
    host.on_before_save(editor.clone());

    gate.check_post(&editor_save(1, "spam")).unwrap();

    assert!(editor.fired.load(Ordering::SeqCst));
    assert_eq!(host.item(1).status, PostStatus::Trash);
    assert_eq!(host.item(2).status, PostStatus::Trash);
    assert_eq!(
        *host.mutations.lock().unwrap(),
        vec!["trash:1".to_string(), "trash:2".to_string()]
    );
    assert!(host.is_attached(CHECK_POST_HOOK, ContentId(1)));
}

#[test]
fn unknown_item_is_skipped() {
    let host = Arc::new(FakeHost::default());
    let gate = gate(&host, MapStore::with_settings("trash", &["spam"]));

    let verdict = gate.check_post(&editor_save(9, "spam")).unwrap();

    assert_eq!(
        verdict,
        Verdict::Skipped {
            content_id: ContentId(9),
            skip: SkipReason::MissingStatus,
        }
    );
}

#[test]
fn apply_action_uses_configured_mode() {
    let host = Arc::new(FakeHost::default().with_item(5, "publish", &[]));
    let gate = gate(&host, MapStore::with_settings("private", &["spam"]));

    gate.apply_action(ContentId(5)).unwrap();

    assert_eq!(host.item(5).status, PostStatus::Private);
}
