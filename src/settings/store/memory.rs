use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeSet;

use super::{ConfigStore, Group, StorePath};
use crate::settings::error::StoreResult;

/// A process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: DashMap<StorePath, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn get(&self, path: &StorePath) -> StoreResult<Option<Value>> {
        Ok(self.values.get(path).map(|entry| entry.value().clone()))
    }

    async fn set(&self, path: &StorePath, value: Value) -> StoreResult<()> {
        self.values.insert(path.clone(), value);
        Ok(())
    }

    async fn clear(&self, path: &StorePath) -> StoreResult<()> {
        self.values.remove(path);
        Ok(())
    }

    async fn enumerate_children(&self, group: Group) -> StoreResult<BTreeSet<String>> {
        Ok(self
            .values
            .iter()
            .filter(|entry| entry.key().group == group)
            .map(|entry| entry.key().identifier.clone())
            .collect())
    }
}
