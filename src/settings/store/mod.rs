//! Persistent backing stores for settings.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

use super::error::StoreResult;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{DEFAULT_DB_PATH, SqliteStore};

/// Top-level partition of the store. The four setting scopes map onto the
/// first four groups; `Node` holds the Lavalink node registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
    Global,
    Guild,
    Channel,
    User,
    Node,
}

impl Group {
    pub fn as_str(self) -> &'static str {
        match self {
            Group::Global => "GLOBAL",
            Group::Guild => "GUILD",
            Group::Channel => "CHANNEL",
            Group::User => "USER",
            Group::Node => "NODE",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address of a single stored value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorePath {
    pub group: Group,
    pub identifier: String,
    pub key: &'static str,
}

impl StorePath {
    pub fn new(group: Group, identifier: impl Into<String>, key: &'static str) -> Self {
        Self {
            group,
            identifier: identifier.into(),
            key,
        }
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.identifier.is_empty() {
            write!(f, "{}.{}", self.group, self.key)
        } else {
            write!(f, "{}[{}].{}", self.group, self.identifier, self.key)
        }
    }
}

/// An async key-value document store keyed by scope-qualified paths.
///
/// `get` returns `None` when nothing is stored at the path; defaults are
/// applied by the caller from [`defaults`](super::defaults).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self, path: &StorePath) -> StoreResult<Option<Value>>;
    async fn set(&self, path: &StorePath, value: Value) -> StoreResult<()>;
    async fn clear(&self, path: &StorePath) -> StoreResult<()>;
    /// Identifiers with at least one stored value under `group`.
    async fn enumerate_children(&self, group: Group) -> StoreResult<BTreeSet<String>>;
}
