//! In-memory snapshot store for tests

use super::{SnapshotStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Shares its map between clones so a test can inspect what the app wrote
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get(key))
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.insert(key, value);
        Ok(())
    }

    async fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_items() {
        let store = MemorySnapshotStore::new();
        let mut handle = store.clone();
        tokio_test::block_on(handle.set_item("formData", "{}")).unwrap();
        assert_eq!(store.get("formData").as_deref(), Some("{}"));

        tokio_test::block_on(handle.remove_item("formData")).unwrap();
        assert!(tokio_test::block_on(store.get_item("formData"))
            .unwrap()
            .is_none());
    }
}
