//! Common test utilities, fixtures, and mocks
//! This module contains shared functionality used across the integration scenarios

pub mod mocks;

use rusty_audio::settings::engine::CacheOptions;
use rusty_audio::settings::{ConfigCache, ConfigStore, MemoryStore, SqliteStore};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::test_utils;

fn options(enable_cache: bool) -> CacheOptions {
    CacheOptions {
        enable_cache,
        owners: BTreeSet::from([fixtures::OWNER]),
        ..CacheOptions::default()
    }
}

/// An engine over `store` with caching on and [`fixtures::OWNER`] as owner.
pub fn cache_over(store: Arc<dyn ConfigStore>) -> ConfigCache {
    test_utils::init();
    ConfigCache::new(store, options(true))
}

/// An engine over a fresh in-memory store.
pub fn memory_cache() -> ConfigCache {
    cache_over(Arc::new(MemoryStore::new()))
}

/// Like [`memory_cache`], but every read goes to the store.
pub fn uncached_memory_cache() -> ConfigCache {
    test_utils::init();
    ConfigCache::new(Arc::new(MemoryStore::new()), options(false))
}

/// An engine over an in-memory SQLite database.
pub fn sqlite_cache() -> ConfigCache {
    let store = SqliteStore::open_in_memory().expect("Failed to open in-memory database");
    cache_over(Arc::new(store))
}

/// A database file in the system temp dir, removed on drop.
pub struct TempDb {
    pub path: PathBuf,
}

impl TempDb {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "rusty-audio-{}-{}.db",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        Self { path }
    }

    pub fn open(&self) -> ConfigCache {
        let store = SqliteStore::open(&self.path).expect("Failed to open test database");
        cache_over(Arc::new(store))
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_cache_serves_defaults() {
        let cache = memory_cache();
        let volume = tokio_test::block_on(cache.volume.get_global()).unwrap();
        assert_eq!(volume, 250);
    }

    #[test]
    fn test_temp_db_path() {
        let db = TempDb::new("path-check");
        assert!(db.path.starts_with(std::env::temp_dir()));
        assert!(!db.path.exists());
    }
}
