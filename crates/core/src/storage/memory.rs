use super::SessionStore;
use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local store, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CoreResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| CoreError::storage_error("memory store lock poisoned"))
    }
}

impl SessionStore for MemoryStore {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> CoreResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        self.lock()?.clear();
        Ok(())
    }
}
