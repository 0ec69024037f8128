use assert_matches::assert_matches;
use mockall::Sequence;
use mockall::predicate::eq;
use rusty_audio::settings::{Group, SettingsError, StoreError, StorePath};
use serde_json::json;
use std::sync::Arc;

use crate::common::cache_over;
use crate::common::fixtures::GUILD_A;
use crate::common::mocks::{MockStore, outage, unreachable_store};

fn guild_volume_path() -> StorePath {
    StorePath::new(Group::Guild, GUILD_A.get().to_string(), "max_volume")
}

#[tokio::test]
async fn test_failed_write_leaves_cache_untouched() {
    let mut store = MockStore::new();
    store
        .expect_set()
        .withf(|_, value| *value == json!(100))
        .times(1)
        .returning(|_, _| Ok(()));
    store
        .expect_set()
        .withf(|_, value| *value == json!(300))
        .times(1)
        .returning(|_, _| Err(outage()));
    let cache = cache_over(Arc::new(store));

    cache.volume.set_guild(GUILD_A, Some(100)).await.unwrap();
    assert_matches!(
        cache.volume.set_guild(GUILD_A, Some(300)).await,
        Err(SettingsError::StoreUnavailable(StoreError::Unavailable(_)))
    );

    // Served from the cache; the mock has no read expectation.
    assert_eq!(cache.volume.get_guild(GUILD_A).await.unwrap(), 100);
}

#[tokio::test]
async fn test_failed_clear_keeps_previous_value() {
    let mut store = MockStore::new();
    store.expect_set().times(1).returning(|_, _| Ok(()));
    store
        .expect_clear()
        .with(eq(guild_volume_path()))
        .times(1)
        .returning(|_| Err(outage()));
    let cache = cache_over(Arc::new(store));

    cache.volume.set_guild(GUILD_A, Some(90)).await.unwrap();
    assert!(cache.volume.set_guild(GUILD_A, None).await.is_err());
    assert_eq!(cache.volume.get_guild(GUILD_A).await.unwrap(), 90);
}

#[tokio::test]
async fn test_read_failure_propagates_and_is_not_cached() {
    let mut store = MockStore::new();
    let mut seq = Sequence::new();
    store
        .expect_get()
        .with(eq(guild_volume_path()))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(outage()));
    store
        .expect_get()
        .with(eq(guild_volume_path()))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(Some(json!(75))));
    let cache = cache_over(Arc::new(store));

    assert_matches!(
        cache.volume.get_guild(GUILD_A).await,
        Err(SettingsError::StoreUnavailable(_))
    );
    assert_eq!(cache.volume.get_guild(GUILD_A).await.unwrap(), 75);
}

#[tokio::test]
async fn test_outage_surfaces_from_every_component() {
    let cache = cache_over(Arc::new(unreachable_store()));

    assert_matches!(
        cache.blacklist_whitelist.is_query_allowed(Some(GUILD_A), "lofi").await,
        Err(SettingsError::StoreUnavailable(_))
    );
    assert_matches!(
        cache.dj_roles.get_guild(GUILD_A).await,
        Err(SettingsError::StoreUnavailable(_))
    );
    assert_matches!(
        cache.node_config.get_all_identifiers().await,
        Err(SettingsError::StoreUnavailable(_))
    );
}

#[tokio::test]
async fn test_malformed_value_is_a_decode_error() {
    let mut store = MockStore::new();
    store
        .expect_get()
        .returning(|_| Ok(Some(json!("loud"))));
    let cache = cache_over(Arc::new(store));

    assert_matches!(
        cache.volume.get_guild(GUILD_A).await,
        Err(SettingsError::Decode { key: "max_volume", .. })
    );
}
