//! services/dashboard/src/adapters/memory_store.rs
//!
//! An in-process `SessionStorage`. Nothing survives a restart; used for tests
//! and for embedding the dashboard without a writable disk.

use async_trait::async_trait;
use legalvision_core::ports::{PortResult, SessionStorage};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemorySessionStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, bypassing any serialization.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .lock()
            .insert(key.to_string(), value.to_string());
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> PortResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}
