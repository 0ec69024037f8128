//! The generic per-setting manager and its read-through cache.

use dashmap::DashMap;
use serde_json::Value;
use serenity::model::id::{ChannelId, GuildId, UserId};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info};

use super::error::{SettingsError, SettingsResult};
use super::keys::Setting;
use super::resolver::{self, Layers, Resolved};
use super::store::ConfigStore;
use super::value::SettingValue;
use super::{RequestContext, Scope, Target, defaults};

/// Scoped get/set/clear for one setting, with an in-memory cache in front of
/// the store.
///
/// The cache only ever holds values that were read from, or successfully
/// written to, the store. A failed write leaves it untouched, and a store
/// read never replaces a value written after that read started.
pub struct SettingManager<V: SettingValue> {
    setting: Setting<V>,
    store: Arc<dyn ConfigStore>,
    enable_cache: bool,
    cache: DashMap<Target, V>,
    /// Bumped under the target's cache lock on every successful write.
    writes: AtomicU64,
}

impl<V: SettingValue> SettingManager<V> {
    pub fn new(setting: Setting<V>, store: Arc<dyn ConfigStore>, enable_cache: bool) -> Self {
        Self {
            setting,
            store,
            enable_cache,
            cache: DashMap::new(),
            writes: AtomicU64::new(0),
        }
    }

    pub fn setting(&self) -> &Setting<V> {
        &self.setting
    }

    pub fn name(&self) -> &'static str {
        self.setting.name
    }

    fn decode(&self, raw: Value) -> SettingsResult<V> {
        serde_json::from_value(raw).map_err(|source| SettingsError::Decode {
            key: self.setting.name,
            source,
        })
    }

    fn encode(&self, value: &V) -> SettingsResult<Value> {
        serde_json::to_value(value).map_err(|source| SettingsError::Decode {
            key: self.setting.name,
            source,
        })
    }

    /// The static default at `scope`, or `V::default()` when none is declared.
    pub fn default_for(&self, scope: Scope) -> SettingsResult<V> {
        match defaults::lookup(scope.group(), self.setting.name) {
            Some(raw) => self.decode(raw.clone()),
            None => Ok(V::default()),
        }
    }

    fn remember(&self, target: Target, value: &V) {
        if self.enable_cache {
            let slot = self.cache.entry(target);
            self.writes.fetch_add(1, Ordering::SeqCst);
            slot.insert(value.clone());
        }
    }

    /// Caches a value read from the store, unless a write landed after
    /// `writes_seen` was taken. The writer's value stays in that case.
    fn fill(&self, target: Target, writes_seen: u64, value: &V) {
        if !self.enable_cache {
            return;
        }
        let slot = self.cache.entry(target);
        if self.writes.load(Ordering::SeqCst) == writes_seen {
            slot.insert(value.clone());
        } else {
            debug!(
                "Not caching {} at {:?}: written during the read",
                self.setting.name, target
            );
        }
    }

    /// Reads the value at `target`, serving it from the cache when possible.
    pub async fn get(&self, target: Target) -> SettingsResult<V> {
        if self.enable_cache {
            if let Some(cached) = self.cache.get(&target) {
                debug!("Cache hit for {} at {:?}", self.setting.name, target);
                return Ok(cached.value().clone());
            }
        }
        debug!("Cache miss for {} at {:?}", self.setting.name, target);
        self.fetch(target).await
    }

    /// Reads the value at `target` straight from the store and refreshes the
    /// cache with it, unless a write through this manager finished first.
    pub async fn fetch(&self, target: Target) -> SettingsResult<V> {
        let path = target.path(self.setting.name);
        let writes_seen = self.writes.load(Ordering::SeqCst);
        let value = match self.store.get(&path).await {
            Ok(Some(raw)) => self.decode(raw)?,
            Ok(None) => self.default_for(target.scope())?,
            Err(e) => {
                error!("Failed to read {}: {}", path, e);
                return Err(e.into());
            }
        };
        self.fill(target, writes_seen, &value);
        Ok(value)
    }

    /// Persists `value` at `target`, or clears it when `value` is `None`.
    ///
    /// A cleared entry is cached as the scope's static default.
    pub async fn set(&self, target: Target, value: Option<V>) -> SettingsResult<()> {
        let path = target.path(self.setting.name);
        match value {
            Some(value) => {
                let raw = self.encode(&value)?;
                if let Err(e) = self.store.set(&path, raw).await {
                    error!("Failed to write {}: {}", path, e);
                    return Err(e.into());
                }
                info!("Set {}", path);
                self.remember(target, &value);
            }
            None => {
                let default = self.default_for(target.scope())?;
                if let Err(e) = self.store.clear(&path).await {
                    error!("Failed to clear {}: {}", path, e);
                    return Err(e.into());
                }
                info!("Cleared {}", path);
                self.remember(target, &default);
            }
        }
        Ok(())
    }

    /// Identifiers with anything stored under `scope`.
    pub async fn get_all_identifiers(&self, scope: Scope) -> SettingsResult<BTreeSet<String>> {
        Ok(self.store.enumerate_children(scope.group()).await?)
    }

    /// Drops the cached global value so the next read goes to the store.
    pub fn reset_globals(&self) {
        if self.cache.remove(&Target::Global).is_some() {
            debug!("Reset cached global value for {}", self.setting.name);
        }
    }

    pub async fn get_global(&self) -> SettingsResult<V> {
        self.get(Target::Global).await
    }

    pub async fn set_global(&self, value: Option<V>) -> SettingsResult<()> {
        self.set(Target::Global, value).await
    }

    pub async fn get_guild(&self, guild: GuildId) -> SettingsResult<V> {
        self.get(Target::Guild(guild)).await
    }

    pub async fn set_guild(&self, guild: GuildId, value: Option<V>) -> SettingsResult<()> {
        self.set(Target::Guild(guild), value).await
    }

    pub async fn get_channel(&self, channel: ChannelId) -> SettingsResult<V> {
        self.get(Target::Channel(channel)).await
    }

    pub async fn set_channel(&self, channel: ChannelId, value: Option<V>) -> SettingsResult<()> {
        self.set(Target::Channel(channel), value).await
    }

    pub async fn get_user(&self, user: UserId) -> SettingsResult<V> {
        self.get(Target::User(user)).await
    }

    pub async fn set_user(&self, user: UserId, value: Option<V>) -> SettingsResult<()> {
        self.set(Target::User(user), value).await
    }

    /// Whether the global value is in its enforced state. Under a lock this
    /// means guild writes are masked by [`get_context_value`].
    ///
    /// [`get_context_value`]: SettingManager::get_context_value
    pub async fn is_globally_enforced(&self) -> SettingsResult<bool> {
        Ok(self.get_global().await?.is_enforced())
    }

    /// Gathers every layer that applies to `ctx`. Scopes the setting does not
    /// exist at are skipped without touching the store.
    pub async fn layers(&self, ctx: &RequestContext) -> SettingsResult<Layers<V>> {
        let global = if self.setting.supports(Scope::Global) {
            self.get_global().await?
        } else {
            self.default_for(Scope::Global)?
        };
        let mut layers = Layers::global(global);

        if let Some(guild) = ctx.guild.filter(|_| self.setting.supports(Scope::Guild)) {
            layers = layers.with_guild(self.get_guild(guild).await?);
        }
        if let Some(channel) = ctx.channel.filter(|_| self.setting.supports(Scope::Channel)) {
            layers = layers.with_channel(self.get_channel(channel).await?);
        }
        if let Some(user) = ctx.user.filter(|_| self.setting.supports(Scope::User)) {
            layers = layers.with_user(self.get_user(user).await?);
        }
        Ok(layers)
    }

    /// The effective value for `ctx` and the scope that supplied it.
    pub async fn resolve(&self, ctx: &RequestContext) -> SettingsResult<Resolved<V>> {
        let layers = self.layers(ctx).await?;
        Ok(resolver::resolve(self.setting.enforcement, layers))
    }

    pub async fn get_context_value(&self, ctx: &RequestContext) -> SettingsResult<V> {
        Ok(self.resolve(ctx).await?.value)
    }
}

/// The parts of a capped numeric setting as seen from one guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextMax {
    pub global: u64,
    pub guild: u64,
    pub effective: u64,
    pub source: Scope,
}

impl SettingManager<u64> {
    /// The global ceiling, the guild's own value, and the bound that applies.
    pub async fn get_context_max(&self, guild: GuildId) -> SettingsResult<ContextMax> {
        let global = self.get_global().await?;
        let guild_value = self.get_guild(guild).await?;
        let Resolved { value, source } = resolver::resolve(
            self.setting.enforcement,
            Layers::global(global).with_guild(guild_value),
        );
        Ok(ContextMax {
            global,
            guild: guild_value,
            effective: value,
            source,
        })
    }

    /// The bound for a request from `channel` (when given) in `guild`. The
    /// global ceiling always applies on top of the most specific value.
    pub async fn get_max_and_source(
        &self,
        guild: GuildId,
        channel: Option<ChannelId>,
    ) -> SettingsResult<(u64, Scope)> {
        let mut ctx = RequestContext::guild(guild);
        ctx.channel = channel;
        let Resolved { value, source } = self.resolve(&ctx).await?;
        Ok((value, source))
    }
}
