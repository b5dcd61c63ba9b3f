//! Trait abstraction for the snapshot store to enable mocking in tests

use super::StoreError;
use async_trait::async_trait;

/// String key-value store holding serialized form snapshots
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Create or overwrite the value under `key`
    async fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`; removing a missing key is not an error
    async fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}
