//! Moderator commands that change the current server's scope.

use poise::serenity_prelude as serenity;
use std::collections::BTreeSet;
use tracing::{info, warn};

use super::format::{self, QUEUE_RANGE, VOLUME_RANGE};
use super::{KeywordAction, KeywordList, edit_keywords, embeds};
use crate::settings::{ContextMax, Scope};
use crate::{CommandResult, Context, Error, is_mod_or_higher};

/// Change settings for this server.
#[poise::command(
    slash_command,
    guild_only,
    subcommands(
        "volume",
        "maxlength",
        "maxqueue",
        "thumbnail",
        "dj",
        "allowlist",
        "denylist"
    ),
    subcommand_required
)]
pub async fn guild(_ctx: Context<'_>) -> CommandResult {
    Ok(())
}

fn guild_id(ctx: Context<'_>) -> Result<serenity::GuildId, Error> {
    ctx.guild_id()
        .ok_or_else(|| Error::from("This command only works in a server"))
}

/// "**150%**", plus a note when the value comes from the global scope.
fn describe_capped(max: &ContextMax, render: impl Fn(u64) -> String) -> String {
    if max.source != Scope::Global {
        format!("**{}**", render(max.effective))
    } else if max.guild == 0 {
        format!("**{}** (inherited from global)", render(max.effective))
    } else {
        format!(
            "**{}** (the global limit of {} applies)",
            render(max.guild),
            render(max.effective)
        )
    }
}

/// Set this server's maximum volume. Omit to restore the server default of 150%.
///
/// The global limit still applies on top.
#[poise::command(slash_command, guild_only, check = "is_mod_or_higher")]
pub async fn volume(
    ctx: Context<'_>,
    #[description = "Maximum volume in percent (10-500)"] percent: Option<u64>,
) -> CommandResult {
    let guild_id = guild_id(ctx)?;
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
    manager.set_guild(guild_id, percent).await?;
    let max = manager.get_context_max(guild_id).await?;

    ctx.send(embeds::setting_updated(
        "Server maximum volume",
        format!(
            "Maximum volume is now {}.",
            describe_capped(&max, |v| format!("{}%", v))
        ),
    ))
    .await?;
    Ok(())
}

/// Set this server's longest allowed track. `0` or omitted inherits the global limit.
#[poise::command(slash_command, guild_only, check = "is_mod_or_higher")]
pub async fn maxlength(
    ctx: Context<'_>,
    #[description = "Length as hh:mm:ss, mm:ss or seconds"] length: Option<String>,
) -> CommandResult {
    let guild_id = guild_id(ctx)?;
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
    manager.set_guild(guild_id, seconds).await?;
    let max = manager.get_context_max(guild_id).await?;

    ctx.send(embeds::setting_updated(
        "Server maximum track length",
        format!(
            "Tracks are limited to {}.",
            describe_capped(&max, format::format_length_limit)
        ),
    ))
    .await?;
    Ok(())
}

/// Set this server's maximum queue size. Omit to restore the server default of 10,000 tracks.
///
/// The global limit still applies on top.
#[poise::command(slash_command, guild_only, check = "is_mod_or_higher")]
pub async fn maxqueue(
    ctx: Context<'_>,
    #[description = "Maximum queue size (10-20000)"] size: Option<u64>,
) -> CommandResult {
    let guild_id = guild_id(ctx)?;
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
    manager.set_guild(guild_id, size).await?;
    let max = manager.get_context_max(guild_id).await?;

    ctx.send(embeds::setting_updated(
        "Server maximum queue size",
        format!(
            "Queues hold at most {}.",
            describe_capped(&max, |v| format::format_limit(v, "tracks"))
        ),
    ))
    .await?;
    Ok(())
}

/// Show or hide track thumbnails in this server.
#[poise::command(slash_command, guild_only, check = "is_mod_or_higher")]
pub async fn thumbnail(
    ctx: Context<'_>,
    #[description = "Show thumbnails"] enabled: bool,
) -> CommandResult {
    let guild_id = guild_id(ctx)?;
    let manager = &ctx.data().config_cache.thumbnail;

    if manager.is_globally_enforced().await? {
        warn!(
            "Refused thumbnail change in guild {}: locked globally",
            guild_id
        );
        ctx.send(embeds::locked_by_global(manager.name())).await?;
        return Ok(());
    }

    manager.set_guild(guild_id, Some(enabled)).await?;
    ctx.send(embeds::setting_updated(
        "Server thumbnails",
        format!("Thumbnails are now **{}**.", format::format_toggle(enabled)),
    ))
    .await?;
    Ok(())
}

/// What to do with DJ mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum DjAction {
    Enable,
    Disable,
    #[name = "Add role"]
    Add,
    #[name = "Remove role"]
    Remove,
    List,
}

/// Toggle DJ mode or edit the roles allowed to control playback.
#[poise::command(slash_command, guild_only, check = "is_mod_or_higher")]
pub async fn dj(
    ctx: Context<'_>,
    #[description = "What to do"] action: DjAction,
    #[description = "Role to add or remove"] role: Option<serenity::Role>,
) -> CommandResult {
    let guild_id = guild_id(ctx)?;
    let cache = &ctx.data().config_cache;

    match action {
        DjAction::Enable | DjAction::Disable => {
            let enabled = action == DjAction::Enable;
            cache.dj_status.set_guild(guild_id, Some(enabled)).await?;
            info!("DJ mode in guild {} is now {}", guild_id, enabled);
            ctx.send(embeds::setting_updated(
                "DJ mode",
                format!("DJ mode is now **{}**.", format::format_toggle(enabled)),
            ))
            .await?;
            return Ok(());
        }
        DjAction::Add | DjAction::Remove if role.is_none() => {
            ctx.send(embeds::error("Pick a role to add or remove.")).await?;
            return Ok(());
        }
        _ => {}
    }

    let roles = match (action, role) {
        (DjAction::Add, Some(role)) => cache.dj_roles.add_guild(guild_id, [role.id]).await?,
        (DjAction::Remove, Some(role)) => {
            cache.dj_roles.remove_guild(guild_id, [role.id]).await?
        }
        _ => cache.dj_roles.get_guild(guild_id).await?,
    };

    ctx.send(embeds::setting_updated("DJ roles", describe_roles(&roles)))
        .await?;
    Ok(())
}

fn describe_roles(roles: &BTreeSet<u64>) -> String {
    if roles.is_empty() {
        "No DJ roles are set.".to_string()
    } else {
        roles
            .iter()
            .map(|role| format!("<@&{}>", role))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Edit this server's keyword allowlist.
#[poise::command(slash_command, guild_only, check = "is_mod_or_higher")]
pub async fn allowlist(
    ctx: Context<'_>,
    #[description = "What to do"] action: KeywordAction,
    #[description = "Comma separated keywords"] keywords: Option<String>,
) -> CommandResult {
    let guild_id = guild_id(ctx)?;
    edit_keywords(ctx, Some(guild_id), KeywordList::Allow, action, keywords).await
}

/// Edit this server's keyword denylist.
#[poise::command(slash_command, guild_only, check = "is_mod_or_higher")]
pub async fn denylist(
    ctx: Context<'_>,
    #[description = "What to do"] action: KeywordAction,
    #[description = "Comma separated keywords"] keywords: Option<String>,
) -> CommandResult {
    let guild_id = guild_id(ctx)?;
    edit_keywords(ctx, Some(guild_id), KeywordList::Deny, action, keywords).await
}
