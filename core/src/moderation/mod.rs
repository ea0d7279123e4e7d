//! The moderation pipeline: eligibility, tag matching, remediation and the
//! re-entrancy guard around it.

pub mod action;
pub mod eligibility;
pub mod gate;
pub mod guard;
pub mod matcher;
pub mod normalize;
mod verdict;

pub use action::apply_action;
pub use eligibility::check_eligibility;
pub use gate::{register, StoplistGate, CHECK_POST_HOOK};
pub use guard::{with_listener_disarmed, HookGuard, TriggerRegistration};
pub use matcher::{find_forbidden, MatchSource};
pub use normalize::{normalize, split_tag_input};
pub use verdict::{SkipReason, Verdict};
