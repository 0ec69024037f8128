//! Owner-only commands that change the global scope.

use tracing::info;

use super::format::{self, QUEUE_RANGE, VOLUME_RANGE};
use super::{KeywordAction, KeywordList, edit_keywords, embeds};
use crate::{CommandResult, Context, is_owner};

/// Change settings for every server.
#[poise::command(
    slash_command,
    subcommands("volume", "maxlength", "maxqueue", "thumbnail", "allowlist", "denylist"),
    subcommand_required
)]
pub async fn global(_ctx: Context<'_>) -> CommandResult {
    Ok(())
}

/// Set the highest volume any server may use. Omit to restore the default.
#[poise::command(slash_command, check = "is_owner")]
pub async fn volume(
    ctx: Context<'_>,
    #[description = "Maximum volume in percent (10-500)"] percent: Option<u64>,
) -> CommandResult {
    if let Some(percent) = percent.filter(|p| !VOLUME_RANGE.contains(p)) {
        info!("Rejected global max volume {}", percent);
        ctx.send(embeds::out_of_range(
            "volume",
            *VOLUME_RANGE.start(),
            *VOLUME_RANGE.end(),
        ))
        .await?;
        return Ok(());
    }

    let manager = &ctx.data().config_cache.volume;
    manager.set_global(percent).await?;
    let current = manager.get_global().await?;

    ctx.send(embeds::setting_updated(
        "Global maximum volume",
        format!("Servers may now use up to **{}%**.", current),
    ))
    .await?;
    Ok(())
}

/// Set the longest track any server may queue. `0` removes the limit.
#[poise::command(slash_command, check = "is_owner")]
pub async fn maxlength(
    ctx: Context<'_>,
    #[description = "Length as hh:mm:ss, mm:ss or seconds"] length: Option<String>,
) -> CommandResult {
    let seconds = match length.as_deref().map(format::parse_duration) {
        Some(None) => {
            ctx.send(embeds::error("Use `hh:mm:ss`, `mm:ss` or a number of seconds."))
                .await?;
            return Ok(());
        }
        Some(Some(seconds)) => Some(seconds),
        None => None,
    };

    let manager = &ctx.data().config_cache.max_track_length;
    manager.set_global(seconds).await?;
    let current = manager.get_global().await?;

    ctx.send(embeds::setting_updated(
        "Global maximum track length",
        format!("Tracks are limited to **{}**.", format::format_length_limit(current)),
    ))
    .await?;
    Ok(())
}

/// Set the largest queue any server may build. Omit to restore the default.
#[poise::command(slash_command, check = "is_owner")]
pub async fn maxqueue(
    ctx: Context<'_>,
    #[description = "Maximum queue size (10-20000)"] size: Option<u64>,
) -> CommandResult {
    if size.is_some_and(|size| !QUEUE_RANGE.contains(&size)) {
        ctx.send(embeds::out_of_range(
            "size",
            *QUEUE_RANGE.start(),
            *QUEUE_RANGE.end(),
        ))
        .await?;
        return Ok(());
    }

    let manager = &ctx.data().config_cache.max_queue_size;
    manager.set_global(size).await?;
    let current = manager.get_global().await?;

    ctx.send(embeds::setting_updated(
        "Global maximum queue size",
        format!("Queues hold at most **{}**.", format::format_limit(current, "tracks")),
    ))
    .await?;
    Ok(())
}

/// Force thumbnails on in every server, or let servers choose.
#[poise::command(slash_command, check = "is_owner")]
pub async fn thumbnail(
    ctx: Context<'_>,
    #[description = "Lock thumbnails on for every server"] enabled: bool,
) -> CommandResult {
    ctx.data()
        .config_cache
        .thumbnail
        .set_global(Some(enabled))
        .await?;

    let description = if enabled {
        "Thumbnails are now shown in every server.".to_string()
    } else {
        "Servers choose whether to show thumbnails.".to_string()
    };
    ctx.send(embeds::setting_updated("Global thumbnails", description))
        .await?;
    Ok(())
}

/// Edit the global keyword allowlist. When set, only matching queries play.
#[poise::command(slash_command, check = "is_owner")]
pub async fn allowlist(
    ctx: Context<'_>,
    #[description = "What to do"] action: KeywordAction,
    #[description = "Comma separated keywords"] keywords: Option<String>,
) -> CommandResult {
    edit_keywords(ctx, None, KeywordList::Allow, action, keywords).await
}

/// Edit the global keyword denylist.
#[poise::command(slash_command, check = "is_owner")]
pub async fn denylist(
    ctx: Context<'_>,
    #[description = "What to do"] action: KeywordAction,
    #[description = "Comma separated keywords"] keywords: Option<String>,
) -> CommandResult {
    edit_keywords(ctx, None, KeywordList::Deny, action, keywords).await
}
