use std::sync::Arc;

use crate::config::ModerationConfig;
use crate::context::Services;
use crate::error::ModerationError;
use crate::event::SaveEvent;
use crate::host::{ContentId, HookId, HookRegistry, SaveHook};
use crate::settings::{ActionMode, ForbiddenTagSet, StoplistSettings, Transition};

use super::action::apply_action;
use super::eligibility::check_eligibility;
use super::matcher::{find_forbidden, MatchSource};
use super::verdict::Verdict;

/// Hook id the gate registers itself under.
pub const CHECK_POST_HOOK: HookId = HookId("stoplist.check_post");

/// The save-event handler: gates, matches and remediates one save at a time.
pub struct StoplistGate {
    services: Services,
    cfg: ModerationConfig,
}

impl StoplistGate {
    pub fn new(services: Services, cfg: ModerationConfig) -> Self {
        Self { services, cfg }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    #[tracing::instrument(name = "stoplist.check_post", skip(self, event), fields(content_id = %event.content_id))]
    pub fn check_post(&self, event: &SaveEvent) -> Result<Verdict, ModerationError> {
        let content_id = self.resolve_target(event.content_id)?;

        let status = self
            .services
            .content
            .status(content_id)
            .map_err(ModerationError::Host)?;
        if let Err(skip) = check_eligibility(&self.cfg.allowed_statuses, status.as_ref(), event) {
            tracing::debug!(content_id = %content_id, reason = ?skip, "save not processable");
            return Ok(Verdict::Skipped { content_id, skip });
        }

        let settings = self.settings()?;
        let Some(source) = self.match_forbidden(content_id, event, &settings.forbidden_tags())?
        else {
            tracing::debug!(content_id = %content_id, "no forbidden tags");
            return Ok(Verdict::Clean { content_id });
        };

        let transition = self.apply_mode(content_id, settings.action)?;
        tracing::info!(
            content_id = %content_id,
            action = %settings.action,
            matched_on = ?source,
            transition = ?transition,
            "forbidden tag found"
        );

        Ok(match transition {
            Some(_) => Verdict::Remediated {
                content_id,
                action: settings.action,
                source,
            },
            None => Verdict::Matched { content_id, source },
        })
    }

    /// True when the save passes gating and carries a forbidden tag.
    pub fn is_processable(&self, id: ContentId, event: &SaveEvent) -> Result<bool, ModerationError> {
        let status = self
            .services
            .content
            .status(id)
            .map_err(ModerationError::Host)?;
        if check_eligibility(&self.cfg.allowed_statuses, status.as_ref(), event).is_err() {
            return Ok(false);
        }
        self.has_forbidden_tags(id, event)
    }

    pub fn has_forbidden_tags(
        &self,
        id: ContentId,
        event: &SaveEvent,
    ) -> Result<bool, ModerationError> {
        let forbidden = self.settings()?.forbidden_tags();
        Ok(self.match_forbidden(id, event, &forbidden)?.is_some())
    }

    /// Applies the configured action to `id` with this gate's hook detached.
    pub fn apply_action(&self, id: ContentId) -> Result<Option<Transition>, ModerationError> {
        let mode = self.settings()?.action;
        self.apply_mode(id, mode)
    }

    fn apply_mode(
        &self,
        id: ContentId,
        mode: ActionMode,
    ) -> Result<Option<Transition>, ModerationError> {
        apply_action(
            self.services.content.as_ref(),
            self.services.hooks.as_ref(),
            CHECK_POST_HOOK,
            id,
            mode,
        )
        .map_err(ModerationError::Host)
    }

    // Revisions are evaluated and remediated through their parent.
    fn resolve_target(&self, id: ContentId) -> Result<ContentId, ModerationError> {
        let parent = self
            .services
            .content
            .revision_parent(id)
            .map_err(ModerationError::Host)?;
        if let Some(parent) = parent {
            tracing::debug!(revision = %id, parent = %parent, "evaluating revision parent");
        }
        Ok(parent.unwrap_or(id))
    }

    fn settings(&self) -> Result<StoplistSettings, ModerationError> {
        StoplistSettings::load(self.services.options.as_ref()).map_err(ModerationError::Options)
    }

    fn match_forbidden(
        &self,
        id: ContentId,
        event: &SaveEvent,
        forbidden: &ForbiddenTagSet,
    ) -> Result<Option<MatchSource>, ModerationError> {
        if forbidden.is_empty() {
            return Ok(None);
        }
        let assigned = self
            .services
            .content
            .tags(id)
            .map_err(ModerationError::Host)?;
        let submitted = event
            .submitted()
            .and_then(|p| p.taxonomy_input(&self.cfg.tag_taxonomy));
        Ok(find_forbidden(forbidden, &assigned, submitted.as_deref()))
    }
}

impl SaveHook for StoplistGate {
    fn id(&self) -> HookId {
        CHECK_POST_HOOK
    }

    fn on_save(&self, event: &SaveEvent) -> anyhow::Result<()> {
        self.check_post(event)?;
        Ok(())
    }
}

/// Registers the gate as the host's save handler. Call once at startup.
pub fn register(hooks: &dyn HookRegistry, gate: Arc<StoplistGate>) {
    hooks.on_before_save(gate);
    tracing::debug!(hook = %CHECK_POST_HOOK, "stoplist gate registered");
}
