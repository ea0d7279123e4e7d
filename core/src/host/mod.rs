//! Interfaces the gate consumes from the content-management host.

pub mod r#trait;
pub mod types;

pub use r#trait::{ContentHost, HookRegistry, NonceVerifier, OptionStore, SaveHook};
pub use types::{ContentId, HookId, PostStatus};
