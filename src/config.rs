//! Environment-driven configuration, loaded after `.env` is applied.

use serenity::model::id::UserId;
use std::collections::BTreeSet;
use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::settings::engine::CacheOptions;
use crate::settings::store::DEFAULT_DB_PATH;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub database_path: String,
    pub enable_cache: bool,
    pub role_cache_ttl: Duration,
    pub owners: BTreeSet<UserId>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        let database_path = lookup("SETTINGS_DB").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let enable_cache = match lookup("SETTINGS_CACHE") {
            None => true,
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                var: "SETTINGS_CACHE",
                value,
            })?,
        };

        let role_cache_ttl = match lookup("ROLE_CACHE_TTL_SECS") {
            None => Duration::from_secs(60),
            Some(value) => value
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid {
                    var: "ROLE_CACHE_TTL_SECS",
                    value,
                })?,
        };

        let owners = match lookup("BOT_OWNERS") {
            None => BTreeSet::new(),
            Some(value) => parse_owners(&value).ok_or(ConfigError::Invalid {
                var: "BOT_OWNERS",
                value,
            })?,
        };

        Ok(Self {
            discord_token,
            database_path,
            enable_cache,
            role_cache_ttl,
            owners,
        })
    }

    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions {
            enable_cache: self.enable_cache,
            role_cache_ttl: self.role_cache_ttl,
            owners: self.owners.clone(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_owners(value: &str) -> Option<BTreeSet<UserId>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| id.parse::<u64>().ok().filter(|id| *id != 0).map(UserId::new))
        .collect()
}
