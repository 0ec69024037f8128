use pretty_assertions::assert_eq;
use rusty_audio::settings::{RequestContext, Scope, Target};

use crate::common::fixtures::{GUILD_A, GUILD_B, MEMBER, VOICE_CHANNEL};
use crate::common::{memory_cache, uncached_memory_cache};

#[tokio::test]
async fn test_read_after_write_at_every_scope() {
    let cache = memory_cache();

    cache.volume.set_global(Some(400)).await.unwrap();
    cache.volume.set_guild(GUILD_A, Some(120)).await.unwrap();
    cache.volume.set_channel(VOICE_CHANNEL, Some(80)).await.unwrap();
    cache
        .country_code
        .set_user(MEMBER, Some(Some("DE".to_string())))
        .await
        .unwrap();

    assert_eq!(cache.volume.get_global().await.unwrap(), 400);
    assert_eq!(cache.volume.get_guild(GUILD_A).await.unwrap(), 120);
    assert_eq!(cache.volume.get_channel(VOICE_CHANNEL).await.unwrap(), 80);
    assert_eq!(
        cache.country_code.get_user(MEMBER).await.unwrap(),
        Some("DE".to_string())
    );
}

#[tokio::test]
async fn test_clear_restores_scope_default() {
    let cache = memory_cache();

    cache.volume.set_guild(GUILD_A, Some(90)).await.unwrap();
    cache.volume.set_guild(GUILD_A, None).await.unwrap();
    assert_eq!(cache.volume.get_guild(GUILD_A).await.unwrap(), 150);

    cache.max_queue_size.set_global(Some(500)).await.unwrap();
    cache.max_queue_size.set_global(None).await.unwrap();
    assert_eq!(cache.max_queue_size.get_global().await.unwrap(), 10_000);

    cache.volume.set_channel(VOICE_CHANNEL, Some(60)).await.unwrap();
    cache.volume.set_channel(VOICE_CHANNEL, None).await.unwrap();
    assert_eq!(cache.volume.get_channel(VOICE_CHANNEL).await.unwrap(), 0);
}

#[tokio::test]
async fn test_uncached_engine_reads_through() {
    let cache = uncached_memory_cache();

    cache.repeat.set_guild(GUILD_A, Some(true)).await.unwrap();
    assert!(cache.repeat.get_guild(GUILD_A).await.unwrap());
    assert!(!cache.repeat.get_guild(GUILD_B).await.unwrap());
}

#[tokio::test]
async fn test_guild_only_setting_ignores_other_scopes() {
    let cache = memory_cache();
    cache.shuffle.set_guild(GUILD_A, Some(true)).await.unwrap();

    let ctx = RequestContext::guild(GUILD_A)
        .with_channel(VOICE_CHANNEL)
        .with_user(MEMBER);
    let resolved = cache.shuffle.resolve(&ctx).await.unwrap();
    assert!(resolved.value);
    assert_eq!(resolved.source, Scope::Guild);
}

#[tokio::test]
async fn test_country_code_prefers_user_then_guild_then_global() {
    let cache = memory_cache();
    let ctx = RequestContext::guild(GUILD_A).with_user(MEMBER);

    assert_eq!(
        cache.country_code.get_context_value(&ctx).await.unwrap(),
        Some("US".to_string())
    );

    cache
        .country_code
        .set_guild(GUILD_A, Some(Some("GB".to_string())))
        .await
        .unwrap();
    assert_eq!(
        cache.country_code.get_context_value(&ctx).await.unwrap(),
        Some("GB".to_string())
    );

    cache
        .country_code
        .set_user(MEMBER, Some(Some("JP".to_string())))
        .await
        .unwrap();
    let resolved = cache.country_code.resolve(&ctx).await.unwrap();
    assert_eq!(resolved.value, Some("JP".to_string()));
    assert_eq!(resolved.source, Scope::User);
}

#[tokio::test]
async fn test_identifiers_are_enumerated_per_scope() {
    let cache = memory_cache();
    cache.volume.set_guild(GUILD_A, Some(100)).await.unwrap();
    cache.volume.set_guild(GUILD_B, Some(100)).await.unwrap();

    let guilds = cache.volume.get_all_identifiers(Scope::Guild).await.unwrap();
    assert!(guilds.contains(&Target::Guild(GUILD_A).identifier()));
    assert!(guilds.contains(&Target::Guild(GUILD_B).identifier()));
    assert!(
        cache
            .volume
            .get_all_identifiers(Scope::User)
            .await
            .unwrap()
            .is_empty()
    );
}
