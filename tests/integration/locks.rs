use rusty_audio::settings::{RequestContext, Scope};

use crate::common::fixtures::{GUILD_A, GUILD_B};
use crate::common::memory_cache;

#[tokio::test]
async fn test_guild_value_applies_without_global_lock() {
    let cache = memory_cache();
    cache.thumbnail.set_guild(GUILD_A, Some(true)).await.unwrap();

    assert!(!cache.thumbnail.is_globally_enforced().await.unwrap());
    assert!(
        cache
            .thumbnail
            .get_context_value(&RequestContext::guild(GUILD_A))
            .await
            .unwrap()
    );
    assert!(
        !cache
            .thumbnail
            .get_context_value(&RequestContext::guild(GUILD_B))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_global_lock_masks_every_guild_until_released() {
    let cache = memory_cache();
    cache.jukebox.set_guild(GUILD_A, Some(false)).await.unwrap();
    cache.jukebox.set_global(Some(true)).await.unwrap();
    assert!(cache.jukebox.is_globally_enforced().await.unwrap());

    // Writes made under the lock are stored but masked.
    cache.jukebox.set_guild(GUILD_B, Some(false)).await.unwrap();
    for guild in [GUILD_A, GUILD_B] {
        let resolved = cache
            .jukebox
            .resolve(&RequestContext::guild(guild))
            .await
            .unwrap();
        assert!(resolved.value);
        assert_eq!(resolved.source, Scope::Global);
    }

    cache.jukebox.set_global(None).await.unwrap();
    assert!(
        !cache
            .jukebox
            .get_context_value(&RequestContext::guild(GUILD_B))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_numeric_lock_is_enforced_when_non_zero() {
    let cache = memory_cache();
    cache
        .empty_dc_timer
        .set_guild(GUILD_A, Some(30))
        .await
        .unwrap();
    let ctx = RequestContext::guild(GUILD_A);

    assert_eq!(cache.empty_dc_timer.get_context_value(&ctx).await.unwrap(), 30);

    cache.empty_dc_timer.set_global(Some(300)).await.unwrap();
    assert_eq!(
        cache.empty_dc_timer.get_context_value(&ctx).await.unwrap(),
        300
    );
}

#[tokio::test]
async fn test_guild_defaults_apply_without_writes() {
    let cache = memory_cache();
    let ctx = RequestContext::guild(GUILD_A);

    // Guild defaults differ from the global ones for these.
    assert!(cache.auto_deafen.get_context_value(&ctx).await.unwrap());
    assert!(cache.persistent_queue.get_context_value(&ctx).await.unwrap());
    assert!(!cache.auto_deafen.get_context_value(&RequestContext::global()).await.unwrap());
}
