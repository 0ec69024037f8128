//! Role-based settings: DJ roles and admin/mod privilege lookups.

use serenity::model::id::{GuildId, RoleId, UserId};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::cache::TimedCache;
use super::error::SettingsResult;
use super::keys;
use super::manager::SettingManager;
use super::store::ConfigStore;
use super::{RequestContext, Target};

pub type RoleIds = BTreeSet<u64>;

/// Roles allowed to control playback when DJ mode is on.
pub struct DjRolesManager {
    roles: SettingManager<RoleIds>,
}

impl DjRolesManager {
    pub fn new(store: Arc<dyn ConfigStore>, enable_cache: bool) -> Self {
        Self {
            roles: SettingManager::new(keys::DJ_ROLES, store, enable_cache),
        }
    }

    pub async fn get_guild(&self, guild: GuildId) -> SettingsResult<RoleIds> {
        self.roles.get_guild(guild).await
    }

    pub async fn get_context_value(&self, guild: GuildId) -> SettingsResult<RoleIds> {
        self.roles
            .get_context_value(&RequestContext::guild(guild))
            .await
    }

    /// Replaces the whole set, or clears it with `None`.
    pub async fn set_guild(&self, guild: GuildId, roles: Option<RoleIds>) -> SettingsResult<()> {
        self.roles.set_guild(guild, roles).await
    }

    /// Adds roles with a fetch-modify-write against the store.
    pub async fn add_guild(
        &self,
        guild: GuildId,
        roles: impl IntoIterator<Item = RoleId>,
    ) -> SettingsResult<RoleIds> {
        let target = Target::Guild(guild);
        let mut current = self.roles.fetch(target).await?;
        current.extend(roles.into_iter().map(|role| role.get()));
        self.roles.set(target, Some(current.clone())).await?;
        info!("DJ roles for guild {} are now {:?}", guild, current);
        Ok(current)
    }

    /// Removes roles with a fetch-modify-write against the store.
    pub async fn remove_guild(
        &self,
        guild: GuildId,
        roles: impl IntoIterator<Item = RoleId>,
    ) -> SettingsResult<RoleIds> {
        let removed: RoleIds = roles.into_iter().map(|role| role.get()).collect();
        let target = Target::Guild(guild);
        let mut current = self.roles.fetch(target).await?;
        current.retain(|role| !removed.contains(role));
        self.roles.set(target, Some(current.clone())).await?;
        info!("DJ roles for guild {} are now {:?}", guild, current);
        Ok(current)
    }

    /// Whether any of `member_roles` is a DJ role in `guild`.
    pub async fn member_is_dj(&self, guild: GuildId, member_roles: &[RoleId]) -> SettingsResult<bool> {
        let dj_roles = self.get_context_value(guild).await?;
        Ok(member_roles.iter().any(|role| dj_roles.contains(&role.get())))
    }
}

/// The privilege a check asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    Owner,
    Admin,
    Mod,
}

/// Admin and mod role lookups, cached for a short window so a burst of
/// checks from one command hits the store once.
pub struct PrivilegeManager {
    admin_roles: SettingManager<RoleIds>,
    mod_roles: SettingManager<RoleIds>,
    admin_cache: TimedCache<GuildId, RoleIds>,
    mod_cache: TimedCache<GuildId, RoleIds>,
    owners: BTreeSet<UserId>,
}

impl PrivilegeManager {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        enable_cache: bool,
        ttl: Duration,
        owners: BTreeSet<UserId>,
    ) -> Self {
        Self {
            admin_roles: SettingManager::new(keys::ADMIN_ROLES, store.clone(), enable_cache),
            mod_roles: SettingManager::new(keys::MOD_ROLES, store, enable_cache),
            admin_cache: TimedCache::new(ttl),
            mod_cache: TimedCache::new(ttl),
            owners,
        }
    }

    pub fn owners(&self) -> &BTreeSet<UserId> {
        &self.owners
    }

    pub fn is_owner(&self, user: UserId) -> bool {
        self.owners.contains(&user)
    }

    async fn lookup(
        manager: &SettingManager<RoleIds>,
        cache: &TimedCache<GuildId, RoleIds>,
        guild: GuildId,
    ) -> SettingsResult<RoleIds> {
        if let Some(roles) = cache.get(&guild) {
            return Ok(roles);
        }
        debug!("Fetching {} for guild {}", manager.name(), guild);
        let generation = cache.generation();
        let roles = manager.fetch(Target::Guild(guild)).await?;
        if !cache.insert_if_current(guild, generation, roles.clone()) {
            debug!("Roles for guild {} changed during lookup, not caching", guild);
        }
        Ok(roles)
    }

    pub async fn get_admin_roles(&self, guild: GuildId) -> SettingsResult<RoleIds> {
        Self::lookup(&self.admin_roles, &self.admin_cache, guild).await
    }

    pub async fn get_mod_roles(&self, guild: GuildId) -> SettingsResult<RoleIds> {
        Self::lookup(&self.mod_roles, &self.mod_cache, guild).await
    }

    pub async fn set_admin_roles(&self, guild: GuildId, roles: Option<RoleIds>) -> SettingsResult<()> {
        self.admin_roles.set_guild(guild, roles).await?;
        self.admin_cache.invalidate(&guild);
        Ok(())
    }

    pub async fn set_mod_roles(&self, guild: GuildId, roles: Option<RoleIds>) -> SettingsResult<()> {
        self.mod_roles.set_guild(guild, roles).await?;
        self.mod_cache.invalidate(&guild);
        Ok(())
    }

    /// Owners, or members holding an admin role.
    pub async fn member_is_admin_or_higher(
        &self,
        guild: GuildId,
        user: UserId,
        member_roles: &[RoleId],
    ) -> SettingsResult<bool> {
        if self.is_owner(user) {
            return Ok(true);
        }
        let admin = self.get_admin_roles(guild).await?;
        Ok(member_roles.iter().any(|role| admin.contains(&role.get())))
    }

    /// Owners, or members holding an admin or mod role.
    pub async fn member_is_mod_or_higher(
        &self,
        guild: GuildId,
        user: UserId,
        member_roles: &[RoleId],
    ) -> SettingsResult<bool> {
        if self.member_is_admin_or_higher(guild, user, member_roles).await? {
            return Ok(true);
        }
        let moderators = self.get_mod_roles(guild).await?;
        Ok(member_roles.iter().any(|role| moderators.contains(&role.get())))
    }

    /// Whether `user` holds `privilege`. Outside a guild only owners pass.
    pub async fn get_context_value(
        &self,
        guild: Option<GuildId>,
        user: UserId,
        member_roles: &[RoleId],
        privilege: Privilege,
    ) -> SettingsResult<bool> {
        let Some(guild) = guild else {
            return Ok(privilege == Privilege::Owner && self.is_owner(user));
        };
        match privilege {
            Privilege::Owner => Ok(self.is_owner(user)),
            Privilege::Admin => self.member_is_admin_or_higher(guild, user, member_roles).await,
            Privilege::Mod => self.member_is_mod_or_higher(guild, user, member_roles).await,
        }
    }

    pub fn reset_globals(&self) {
        self.admin_cache.clear();
        self.mod_cache.clear();
    }
}
