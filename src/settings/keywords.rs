//! Keyword allow/deny lists that gate play queries.
//!
//! A non-empty global allowlist decides on its own: only queries matching it
//! are accepted anywhere. Otherwise a query is rejected when it matches the
//! global or guild denylist, and, if the guild has an allowlist, accepted
//! only when it matches that.

use serenity::model::id::GuildId;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::SettingsResult;
use super::keys;
use super::manager::SettingManager;
use super::store::ConfigStore;
use super::{RequestContext, Target};

pub type Keywords = BTreeSet<String>;

pub struct KeywordFilter {
    whitelist: SettingManager<Keywords>,
    blacklist: SettingManager<Keywords>,
}

/// Lowercases and trims, dropping empty entries.
fn normalize<I, S>(keywords: I) -> Keywords
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Whether any keyword occurs in `query`.
fn matches(keywords: &Keywords, query: &str) -> bool {
    let query = query.to_lowercase();
    keywords.iter().any(|keyword| query.contains(keyword.as_str()))
}

fn context(guild: Option<GuildId>) -> RequestContext {
    guild.map_or_else(RequestContext::global, RequestContext::guild)
}

impl KeywordFilter {
    pub fn new(store: Arc<dyn ConfigStore>, enable_cache: bool) -> Self {
        Self {
            whitelist: SettingManager::new(keys::KEYWORD_WHITELIST, store.clone(), enable_cache),
            blacklist: SettingManager::new(keys::KEYWORD_BLACKLIST, store, enable_cache),
        }
    }

    /// Fetch-modify-write against the store, bypassing the cached copy to
    /// keep the race window between concurrent edits small.
    async fn modify<F>(
        manager: &SettingManager<Keywords>,
        guild: Option<GuildId>,
        edit: F,
    ) -> SettingsResult<Keywords>
    where
        F: FnOnce(&mut Keywords),
    {
        let target = Target::from(guild);
        let mut current = manager.fetch(target).await?;
        edit(&mut current);
        manager.set(target, Some(current.clone())).await?;
        Ok(current)
    }

    pub async fn get_whitelist(&self, guild: Option<GuildId>) -> SettingsResult<Keywords> {
        self.whitelist.get(Target::from(guild)).await
    }

    pub async fn get_blacklist(&self, guild: Option<GuildId>) -> SettingsResult<Keywords> {
        self.blacklist.get(Target::from(guild)).await
    }

    pub async fn add_to_whitelist<I, S>(
        &self,
        guild: Option<GuildId>,
        keywords: I,
    ) -> SettingsResult<Keywords>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let added = normalize(keywords);
        info!("Adding {:?} to the allowlist of {:?}", added, guild);
        Self::modify(&self.whitelist, guild, |list| list.extend(added)).await
    }

    pub async fn remove_from_whitelist<I, S>(
        &self,
        guild: Option<GuildId>,
        keywords: I,
    ) -> SettingsResult<Keywords>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let removed = normalize(keywords);
        info!("Removing {:?} from the allowlist of {:?}", removed, guild);
        Self::modify(&self.whitelist, guild, |list| {
            list.retain(|k| !removed.contains(k))
        })
        .await
    }

    pub async fn add_to_blacklist<I, S>(
        &self,
        guild: Option<GuildId>,
        keywords: I,
    ) -> SettingsResult<Keywords>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let added = normalize(keywords);
        info!("Adding {:?} to the denylist of {:?}", added, guild);
        Self::modify(&self.blacklist, guild, |list| list.extend(added)).await
    }

    pub async fn remove_from_blacklist<I, S>(
        &self,
        guild: Option<GuildId>,
        keywords: I,
    ) -> SettingsResult<Keywords>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let removed = normalize(keywords);
        info!("Removing {:?} from the denylist of {:?}", removed, guild);
        Self::modify(&self.blacklist, guild, |list| {
            list.retain(|k| !removed.contains(k))
        })
        .await
    }

    /// Empties one scope's allowlist. Other scopes are untouched.
    pub async fn clear_whitelist(&self, guild: Option<GuildId>) -> SettingsResult<()> {
        self.whitelist.set(Target::from(guild), None).await
    }

    /// Empties one scope's denylist. Other scopes are untouched.
    pub async fn clear_blacklist(&self, guild: Option<GuildId>) -> SettingsResult<()> {
        self.blacklist.set(Target::from(guild), None).await
    }

    /// The global allowlist, merged with the guild's when one is given.
    pub async fn get_context_whitelist(&self, guild: Option<GuildId>) -> SettingsResult<Keywords> {
        self.whitelist.get_context_value(&context(guild)).await
    }

    /// The global denylist, merged with the guild's when one is given.
    pub async fn get_context_blacklist(&self, guild: Option<GuildId>) -> SettingsResult<Keywords> {
        self.blacklist.get_context_value(&context(guild)).await
    }

    /// Decides whether `query` may be played in `guild`.
    pub async fn is_query_allowed(&self, guild: Option<GuildId>, query: &str) -> SettingsResult<bool> {
        let global_whitelist = self.whitelist.get_global().await?;
        if !global_whitelist.is_empty() {
            let allowed = matches(&global_whitelist, query);
            debug!("Global allowlist decided {:?}: {}", query, allowed);
            return Ok(allowed);
        }

        let blacklist = self.get_context_blacklist(guild).await?;
        if matches(&blacklist, query) {
            debug!("Query {:?} rejected by denylist", query);
            return Ok(false);
        }

        let guild_whitelist = match guild {
            Some(guild) => self.whitelist.get_guild(guild).await?,
            None => Keywords::new(),
        };
        Ok(guild_whitelist.is_empty() || matches(&guild_whitelist, query))
    }

    pub fn reset_globals(&self) {
        self.whitelist.reset_globals();
        self.blacklist.reset_globals();
    }
}
