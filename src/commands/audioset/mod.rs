//! `/audioset`: owners configure global values and nodes, moderators their
//! server and its channels. Every command reads and writes through the shared
//! [`ConfigCache`](crate::settings::ConfigCache).

pub(crate) mod channel;
pub(crate) mod embeds;
pub(crate) mod format;
pub(crate) mod global;
pub(crate) mod guild;
pub(crate) mod node;
pub(crate) mod settings;

use crate::{CommandResult, Context};
use poise::serenity_prelude as serenity;
use tracing::info;

use channel::channel;
use global::global;
use guild::guild;
use node::node;
use settings::settings;

/// View and change audio settings.
#[poise::command(
    slash_command,
    category = "Audio",
    subcommands("global", "guild", "channel", "node", "settings"),
    subcommand_required
)]
pub async fn audioset(_ctx: Context<'_>) -> CommandResult {
    Ok(())
}

/// What to do with a keyword list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum KeywordAction {
    Add,
    Remove,
    List,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeywordList {
    Allow,
    Deny,
}

impl KeywordList {
    fn label(self) -> &'static str {
        match self {
            KeywordList::Allow => "allowlist",
            KeywordList::Deny => "denylist",
        }
    }
}

/// Applies `action` to one scope's keyword list; `None` addresses the global
/// list.
pub(crate) async fn edit_keywords(
    ctx: Context<'_>,
    guild_id: Option<serenity::GuildId>,
    list: KeywordList,
    action: KeywordAction,
    keywords: Option<String>,
) -> CommandResult {
    let filter = &ctx.data().config_cache.blacklist_whitelist;
    let scope = if guild_id.is_some() { "Server" } else { "Global" };
    let title = format!("{} {}", scope, list.label());

    let entries = keywords.as_deref().map(format::split_list).unwrap_or_default();
    if matches!(action, KeywordAction::Add | KeywordAction::Remove) && entries.is_empty() {
        ctx.send(embeds::error("Provide one or more comma separated keywords."))
            .await?;
        return Ok(());
    }

    let updated = match (list, action) {
        (KeywordList::Allow, KeywordAction::Add) => {
            filter.add_to_whitelist(guild_id, entries).await?
        }
        (KeywordList::Allow, KeywordAction::Remove) => {
            filter.remove_from_whitelist(guild_id, entries).await?
        }
        (KeywordList::Deny, KeywordAction::Add) => {
            filter.add_to_blacklist(guild_id, entries).await?
        }
        (KeywordList::Deny, KeywordAction::Remove) => {
            filter.remove_from_blacklist(guild_id, entries).await?
        }
        (KeywordList::Allow, KeywordAction::List) => filter.get_whitelist(guild_id).await?,
        (KeywordList::Deny, KeywordAction::List) => filter.get_blacklist(guild_id).await?,
        (KeywordList::Allow, KeywordAction::Clear) => {
            filter.clear_whitelist(guild_id).await?;
            Default::default()
        }
        (KeywordList::Deny, KeywordAction::Clear) => {
            filter.clear_blacklist(guild_id).await?;
            Default::default()
        }
    };

    if action != KeywordAction::List {
        info!(
            "{} changed the {} of {:?} ({:?})",
            ctx.author().name,
            list.label(),
            guild_id,
            action
        );
    }
    ctx.send(embeds::keyword_list(&title, &updated)).await?;
    Ok(())
}
