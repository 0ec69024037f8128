use pretty_assertions::assert_eq;
use rstest::rstest;
use rusty_audio::settings::{ContextMax, Scope};

use crate::common::fixtures::{GUILD_A, VOICE_CHANNEL};
use crate::common::memory_cache;

#[rstest]
#[case::guild_below_cap(150, 100, 100, Scope::Guild)]
#[case::guild_above_cap(150, 300, 150, Scope::Global)]
#[case::equal_values(200, 200, 200, Scope::Guild)]
#[case::unbounded_global(0, 300, 300, Scope::Guild)]
#[tokio::test]
async fn test_volume_context_max(
    #[case] global: u64,
    #[case] guild: u64,
    #[case] effective: u64,
    #[case] source: Scope,
) {
    let cache = memory_cache();
    cache.volume.set_global(Some(global)).await.unwrap();
    cache.volume.set_guild(GUILD_A, Some(guild)).await.unwrap();

    assert_eq!(
        cache.volume.get_context_max(GUILD_A).await.unwrap(),
        ContextMax {
            global,
            guild,
            effective,
            source,
        }
    );
}

#[tokio::test]
async fn test_raising_guild_value_never_exceeds_cap() {
    let cache = memory_cache();
    cache.max_queue_size.set_global(Some(1_000)).await.unwrap();

    for guild in [10, 999, 1_000, 1_001, 20_000] {
        cache
            .max_queue_size
            .set_guild(GUILD_A, Some(guild))
            .await
            .unwrap();
        let max = cache.max_queue_size.get_context_max(GUILD_A).await.unwrap();
        assert!(max.effective <= 1_000, "{} escaped the cap", guild);
        assert_eq!(max.effective, guild.min(1_000));
    }
}

#[tokio::test]
async fn test_zero_length_means_no_limit_at_every_scope() {
    let cache = memory_cache();

    // Both unbounded.
    let max = cache.max_track_length.get_context_max(GUILD_A).await.unwrap();
    assert_eq!(max.effective, 0);

    // A guild limit applies under an unbounded global.
    cache
        .max_track_length
        .set_guild(GUILD_A, Some(600))
        .await
        .unwrap();
    assert_eq!(
        cache
            .max_track_length
            .get_context_max(GUILD_A)
            .await
            .unwrap()
            .effective,
        600
    );

    // An unbounded guild inherits the global limit instead of forbidding everything.
    cache
        .max_track_length
        .set_global(Some(3_600))
        .await
        .unwrap();
    cache
        .max_track_length
        .set_guild(GUILD_A, Some(0))
        .await
        .unwrap();
    let max = cache.max_track_length.get_context_max(GUILD_A).await.unwrap();
    assert_eq!(max.effective, 3_600);
    assert_eq!(max.source, Scope::Global);
}

#[tokio::test]
async fn test_channel_value_takes_precedence_under_global_cap() {
    let cache = memory_cache();
    cache.volume.set_global(Some(200)).await.unwrap();
    cache.volume.set_guild(GUILD_A, Some(180)).await.unwrap();

    assert_eq!(
        cache
            .volume
            .get_max_and_source(GUILD_A, Some(VOICE_CHANNEL))
            .await
            .unwrap(),
        (180, Scope::Guild)
    );

    cache
        .volume
        .set_channel(VOICE_CHANNEL, Some(90))
        .await
        .unwrap();
    assert_eq!(
        cache
            .volume
            .get_max_and_source(GUILD_A, Some(VOICE_CHANNEL))
            .await
            .unwrap(),
        (90, Scope::Channel)
    );

    cache
        .volume
        .set_channel(VOICE_CHANNEL, Some(450))
        .await
        .unwrap();
    assert_eq!(
        cache
            .volume
            .get_max_and_source(GUILD_A, Some(VOICE_CHANNEL))
            .await
            .unwrap(),
        (200, Scope::Global)
    );

    assert_eq!(
        cache.volume.get_max_and_source(GUILD_A, None).await.unwrap(),
        (180, Scope::Guild)
    );
}

#[tokio::test]
async fn test_clearing_guild_limits_restores_server_defaults() {
    let cache = memory_cache();
    cache.volume.set_global(Some(400)).await.unwrap();
    cache.max_queue_size.set_global(Some(20_000)).await.unwrap();
    cache.volume.set_guild(GUILD_A, Some(300)).await.unwrap();
    cache.max_queue_size.set_guild(GUILD_A, Some(500)).await.unwrap();

    cache.volume.set_guild(GUILD_A, None).await.unwrap();
    cache.max_queue_size.set_guild(GUILD_A, None).await.unwrap();

    // Not the global limit: the server default of 150% and 10,000 tracks.
    let volume = cache.volume.get_context_max(GUILD_A).await.unwrap();
    assert_eq!((volume.effective, volume.source), (150, Scope::Guild));
    let queue = cache.max_queue_size.get_context_max(GUILD_A).await.unwrap();
    assert_eq!((queue.effective, queue.source), (10_000, Scope::Guild));
}
