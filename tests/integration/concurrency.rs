use rusty_audio::settings::RequestContext;
use rusty_audio::settings::roles::RoleIds;
use serenity::model::id::GuildId;
use std::sync::Arc;

use crate::common::fixtures::{GUILD_A, MEMBER, MOD_ROLE};
use crate::common::mocks::StalledReadStore;
use crate::common::{cache_over, memory_cache};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_writes_to_different_guilds() {
    let cache = Arc::new(memory_cache());
    cache.volume.set_global(Some(200)).await.unwrap();

    let tasks: Vec<_> = (1..=32u64)
        .map(|id| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                let guild = GuildId::new(id);
                cache.volume.set_guild(guild, Some(id * 10)).await.unwrap();
                cache
                    .blacklist_whitelist
                    .add_to_blacklist(Some(guild), [format!("word{}", id)])
                    .await
                    .unwrap();
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    for id in 1..=32u64 {
        let guild = GuildId::new(id);
        let max = cache.volume.get_context_max(guild).await.unwrap();
        assert_eq!(max.guild, id * 10);
        assert_eq!(max.effective, (id * 10).min(200));
        assert_eq!(
            cache
                .blacklist_whitelist
                .get_blacklist(Some(guild))
                .await
                .unwrap()
                .len(),
            1
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_readers_see_a_written_value() {
    let cache = Arc::new(memory_cache());
    let guild = GuildId::new(99);
    cache.thumbnail.set_guild(guild, Some(true)).await.unwrap();

    let readers: Vec<_> = (0..16)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                cache
                    .thumbnail
                    .get_context_value(&RequestContext::guild(guild))
                    .await
                    .unwrap()
            })
        })
        .collect();
    for reader in readers {
        assert!(reader.await.unwrap());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_read_overlapping_a_write_does_not_cache_the_older_value() {
    let store = Arc::new(StalledReadStore::default());
    let cache = Arc::new(cache_over(store.clone()));

    store.arm();
    let reader = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.volume.get_guild(GUILD_A).await.unwrap() })
    };
    store.wait_for_read().await;

    cache.volume.set_guild(GUILD_A, Some(80)).await.unwrap();
    store.release();

    // The reader returns what it read, but the write stays in the cache.
    assert_eq!(reader.await.unwrap(), 150);
    assert_eq!(cache.volume.get_guild(GUILD_A).await.unwrap(), 80);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_role_lookup_overlapping_an_update_is_not_cached() {
    let store = Arc::new(StalledReadStore::default());
    let cache = Arc::new(cache_over(store.clone()));

    store.arm();
    let lookup = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.privileges.get_mod_roles(GUILD_A).await.unwrap() })
    };
    store.wait_for_read().await;

    cache
        .privileges
        .set_mod_roles(GUILD_A, Some(RoleIds::from([MOD_ROLE.get()])))
        .await
        .unwrap();
    store.release();

    assert!(lookup.await.unwrap().is_empty());
    assert!(
        cache
            .privileges
            .member_is_mod_or_higher(GUILD_A, MEMBER, &[MOD_ROLE])
            .await
            .unwrap()
    );
}
