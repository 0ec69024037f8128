use tracing::debug;

use super::embeds;
use super::format;
use crate::settings::{RequestContext, Resolved, Scope};
use crate::{CommandResult, Context};

/// Show the settings that apply here, and where each comes from.
#[poise::command(slash_command)]
pub async fn settings(ctx: Context<'_>) -> CommandResult {
    let cache = &ctx.data().config_cache;
    let request = match ctx.guild_id() {
        Some(guild_id) => RequestContext::guild(guild_id)
            .with_channel(ctx.channel_id())
            .with_user(ctx.author().id),
        None => RequestContext::global().with_user(ctx.author().id),
    };
    let requested = if request.guild.is_some() {
        Scope::Channel
    } else {
        Scope::Global
    };
    debug!("Summarising settings for {:?}", request);

    let Resolved { value: volume, source } = cache.volume.resolve(&request).await?;
    let volume = format!("{}% ({})", volume, format::format_source(source, requested));

    let Resolved { value: queue, source } = cache.max_queue_size.resolve(&request).await?;
    let queue = format!(
        "{} ({})",
        format::format_limit(queue, "tracks"),
        format::format_source(source, requested.max(Scope::Guild))
    );

    let Resolved { value: length, source } = cache.max_track_length.resolve(&request).await?;
    let length = format!(
        "{} ({})",
        format::format_length_limit(length),
        format::format_source(source, requested.max(Scope::Guild))
    );

    let thumbnail = cache.thumbnail.get_context_value(&request).await?;
    let country = cache
        .country_code
        .get_context_value(&request)
        .await?
        .unwrap_or_else(|| "not set".to_string());

    let mut fields = vec![
        ("Maximum volume", volume),
        ("Maximum queue", queue),
        ("Maximum length", length),
        ("Thumbnails", format::format_toggle(thumbnail).to_string()),
        ("Search country", country),
    ];

    if let Some(guild_id) = request.guild {
        let dj = cache.dj_status.get_guild(guild_id).await?;
        let dj_roles = cache.dj_roles.get_context_value(guild_id).await?;
        fields.push((
            "DJ mode",
            format!(
                "{} ({} role{})",
                format::format_toggle(dj),
                dj_roles.len(),
                if dj_roles.len() == 1 { "" } else { "s" }
            ),
        ));
    }

    let filter = &cache.blacklist_whitelist;
    let allowed = filter.get_context_whitelist(request.guild).await?;
    let denied = filter.get_context_blacklist(request.guild).await?;
    fields.push(("Allowed keywords", allowed.len().to_string()));
    fields.push(("Denied keywords", denied.len().to_string()));

    let title = if request.guild.is_some() {
        "Settings for this channel"
    } else {
        "Global settings"
    };
    ctx.send(embeds::settings_summary(title, fields).ephemeral(true))
        .await?;
    Ok(())
}
