use std::collections::BTreeSet;

/// Capability required to change stoplist settings.
pub const MANAGE_OPTIONS: &str = "manage_options";

/// The user behind an admin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub login: String,
    pub capabilities: BTreeSet<String>,
}

impl Principal {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            capabilities: BTreeSet::new(),
        }
    }

    pub fn anonymous() -> Self {
        Self::new("")
    }

    pub fn administrator(login: impl Into<String>) -> Self {
        Self::new(login).with_capability(MANAGE_OPTIONS)
    }

    pub fn with_capability(mut self, cap: impl Into<String>) -> Self {
        self.capabilities.insert(cap.into());
        self
    }

    pub fn can(&self, cap: &str) -> bool {
        self.capabilities.contains(cap)
    }
}
