//! Per-channel overrides.

use poise::serenity_prelude as serenity;

use super::embeds;
use super::format::VOLUME_RANGE;
use crate::settings::{RequestContext, Resolved, Scope};
use crate::{CommandResult, Context, Error, is_mod_or_higher};

/// Change settings for one channel.
#[poise::command(slash_command, guild_only, subcommands("volume"), subcommand_required)]
pub async fn channel(_ctx: Context<'_>) -> CommandResult {
    Ok(())
}

/// Set a voice channel's maximum volume. Omit to inherit the server's.
#[poise::command(slash_command, guild_only, check = "is_mod_or_higher")]
pub async fn volume(
    ctx: Context<'_>,
    #[description = "Voice channel to limit"]
    #[channel_types("Voice", "Stage")]
    channel: serenity::GuildChannel,
    #[description = "Maximum volume in percent (10-500)"] percent: Option<u64>,
) -> CommandResult {
    let guild_id = ctx
        .guild_id()
        .ok_or_else(|| Error::from("This command only works in a server"))?;
    if channel.guild_id != guild_id {
        ctx.send(embeds::error("That channel belongs to another server."))
            .await?;
        return Ok(());
    }
    if percent.is_some_and(|p| !VOLUME_RANGE.contains(&p)) {
        ctx.send(embeds::out_of_range(
            "volume",
            *VOLUME_RANGE.start(),
            *VOLUME_RANGE.end(),
        ))
        .await?;
        return Ok(());
    }

    let manager = &ctx.data().config_cache.volume;
    manager.set_channel(channel.id, percent).await?;
    let Resolved { value, source } = manager
        .resolve(&RequestContext::guild(guild_id).with_channel(channel.id))
        .await?;

    let note = match source {
        Scope::Channel => String::new(),
        other => format!(" (from the {} limit)", other),
    };
    ctx.send(embeds::setting_updated(
        "Channel maximum volume",
        format!("Maximum volume in <#{}> is now **{}%**{}.", channel.id, value, note),
    ))
    .await?;
    Ok(())
}
