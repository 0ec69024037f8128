//! The setting resolution engine.
//!
//! Settings live at up to four scopes (global, guild, channel, user). Each
//! [`SettingManager`] keeps a read-through cache over a [`ConfigStore`] and
//! collapses the scoped values into one effective value through the
//! resolver, according to the setting's [`Enforcement`] mode.

use serenity::model::id::{ChannelId, GuildId, UserId};
use std::fmt;

pub mod cache;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod keys;
pub mod keywords;
pub mod manager;
pub mod nodes;
pub mod resolver;
pub mod roles;
pub mod store;
pub mod value;

pub use engine::ConfigCache;
pub use error::{SettingsError, SettingsResult, StoreError, StoreResult};
pub use keys::Setting;
pub use manager::{ContextMax, SettingManager};
pub use resolver::{Enforcement, Layers, Resolved};
pub use store::{ConfigStore, Group, MemoryStore, SqliteStore, StorePath};
pub use value::SettingValue;

/// A level at which a setting can be configured.
///
/// Ordered by authority: `Global > Guild > Channel > User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    User,
    Channel,
    Guild,
    Global,
}

impl Scope {
    pub fn group(self) -> Group {
        match self {
            Scope::Global => Group::Global,
            Scope::Guild => Group::Guild,
            Scope::Channel => Group::Channel,
            Scope::User => Group::User,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Scope::Global => "global",
            Scope::Guild => "server",
            Scope::Channel => "channel",
            Scope::User => "user",
        };
        f.write_str(label)
    }
}

/// One concrete scope entry: the global singleton or a specific snowflake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Global,
    Guild(GuildId),
    Channel(ChannelId),
    User(UserId),
}

impl Target {
    pub fn scope(&self) -> Scope {
        match self {
            Target::Global => Scope::Global,
            Target::Guild(_) => Scope::Guild,
            Target::Channel(_) => Scope::Channel,
            Target::User(_) => Scope::User,
        }
    }

    /// The identifier used in store paths; empty for the global singleton.
    pub fn identifier(&self) -> String {
        match self {
            Target::Global => String::new(),
            Target::Guild(id) => id.get().to_string(),
            Target::Channel(id) => id.get().to_string(),
            Target::User(id) => id.get().to_string(),
        }
    }

    pub fn path(&self, key: &'static str) -> StorePath {
        StorePath::new(self.scope().group(), self.identifier(), key)
    }
}

impl From<Option<GuildId>> for Target {
    /// `None` addresses the global scope.
    fn from(guild: Option<GuildId>) -> Self {
        guild.map_or(Target::Global, Target::Guild)
    }
}

/// The guild, channel and user a request is made from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub guild: Option<GuildId>,
    pub channel: Option<ChannelId>,
    pub user: Option<UserId>,
}

impl RequestContext {
    /// A context with no guild; only global values apply.
    pub fn global() -> Self {
        Self::default()
    }

    pub fn guild(guild: GuildId) -> Self {
        Self {
            guild: Some(guild),
            ..Self::default()
        }
    }

    pub fn with_channel(mut self, channel: ChannelId) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_user(mut self, user: UserId) -> Self {
        self.user = Some(user);
        self
    }
}
