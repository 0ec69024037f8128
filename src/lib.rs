//! Layered settings for a Discord audio bot.
//!
//! Values live at global, guild, channel and user scope; [`settings::ConfigCache`]
//! resolves them for a request according to each setting's enforcement mode.

use std::sync::Arc;

pub mod commands;
pub mod config;
pub mod settings;

use settings::ConfigCache;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// User data, which is stored and accessible in all command invocations
pub struct Data {
    pub config_cache: Arc<ConfigCache>,
}

/// Command check: bot owners only.
pub async fn is_owner(ctx: Context<'_>) -> Result<bool, Error> {
    Ok(ctx.data().config_cache.privileges.is_owner(ctx.author().id))
}

/// Command check: the guild owner, bot owners, or members holding an admin or
/// mod role.
pub async fn is_mod_or_higher(ctx: Context<'_>) -> Result<bool, Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(false);
    };
    let author = ctx.author().id;

    let guild_owner = ctx.guild().map(|guild| guild.owner_id);
    if guild_owner == Some(author) {
        return Ok(true);
    }

    let roles = match ctx.author_member().await {
        Some(member) => member.roles.clone(),
        None => Vec::new(),
    };
    let allowed = ctx
        .data()
        .config_cache
        .privileges
        .member_is_mod_or_higher(guild_id, author, &roles)
        .await?;
    Ok(allowed)
}
