//! Mock implementations for the settings store
//! This module contains a mockall double for simulating store outages, and a
//! memory store that can pause a read mid-flight

use async_trait::async_trait;
use mockall::mock;
use rusty_audio::settings::{
    ConfigStore, Group, MemoryStore, StoreError, StorePath, StoreResult,
};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

mock! {
    pub Store {}

    #[async_trait]
    impl ConfigStore for Store {
        async fn get(&self, path: &StorePath) -> StoreResult<Option<Value>>;
        async fn set(&self, path: &StorePath, value: Value) -> StoreResult<()>;
        async fn clear(&self, path: &StorePath) -> StoreResult<()>;
        async fn enumerate_children(&self, group: Group) -> StoreResult<BTreeSet<String>>;
    }
}

/// The error a disconnected store reports.
pub fn outage() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

/// A store whose every operation fails.
pub fn unreachable_store() -> MockStore {
    let mut store = MockStore::new();
    store.expect_get().returning(|_| Err(outage()));
    store.expect_set().returning(|_, _| Err(outage()));
    store.expect_clear().returning(|_| Err(outage()));
    store.expect_enumerate_children().returning(|_| Err(outage()));
    store
}

/// A memory store that, once armed, parks the next `get` after it has read
/// its value and before returning it.
#[derive(Default)]
pub struct StalledReadStore {
    inner: MemoryStore,
    armed: AtomicBool,
    read_done: Notify,
    release: Notify,
}

impl StalledReadStore {
    /// Parks the next `get`.
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Waits until the parked `get` has read the store.
    pub async fn wait_for_read(&self) {
        self.read_done.notified().await;
    }

    /// Lets the parked `get` return.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl ConfigStore for StalledReadStore {
    async fn get(&self, path: &StorePath) -> StoreResult<Option<Value>> {
        let value = self.inner.get(path).await;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.read_done.notify_one();
            self.release.notified().await;
        }
        value
    }

    async fn set(&self, path: &StorePath, value: Value) -> StoreResult<()> {
        self.inner.set(path, value).await
    }

    async fn clear(&self, path: &StorePath) -> StoreResult<()> {
        self.inner.clear(path).await
    }

    async fn enumerate_children(&self, group: Group) -> StoreResult<BTreeSet<String>> {
        self.inner.enumerate_children(group).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_unreachable_store() {
        let store = unreachable_store();
        let path = StorePath::new(Group::Global, "", "max_volume");
        assert_matches!(store.get(&path).await, Err(StoreError::Unavailable(_)));
        assert_matches!(
            store.enumerate_children(Group::Node).await,
            Err(StoreError::Unavailable(_))
        );
    }
}
