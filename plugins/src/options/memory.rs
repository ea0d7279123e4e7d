use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde_json::Value;
use stoplist_core::api::OptionStore;

/// Options kept for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryOptionStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OptionStore for MemoryOptionStore {
    fn get_option(&self, key: &str) -> anyhow::Result<Option<Value>> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set_option(&self, key: &str, value: Value) -> anyhow::Result<()> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value);
        Ok(())
    }
}
