//! Registry of Lavalink nodes, keyed by name.
//!
//! `rest_uri` is derived from `secured`, `host` and `port`; every write to one
//! of those recomputes and persists it. The field and the URI are two store
//! writes: a failed URI write rolls the field back, but a failure of that
//! rollback leaves them disagreeing until the next successful change.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::defaults;
use super::error::{SettingsError, SettingsResult};
use super::store::{ConfigStore, Group, StorePath};

/// The node every install starts with.
pub const PRIMARY_NODE: &str = "primary";

const HOST: &str = "host";
const PORT: &str = "port";
const PASSWORD: &str = "password";
const SECURED: &str = "secured";
const REST_URI: &str = "rest_uri";
const REGION: &str = "region";
const SHARD_ID: &str = "shard_id";
const SEARCH_ONLY: &str = "search_only";

/// A snapshot of one node's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
    pub secured: bool,
    pub rest_uri: String,
    pub region: String,
    pub shard_id: Option<u64>,
    pub search_only: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let host = "localhost".to_string();
        let port = 2333;
        Self {
            rest_uri: compose_rest_uri(false, &host, port),
            host,
            port,
            password: "youshallnotpass".to_string(),
            secured: false,
            region: String::new(),
            shard_id: None,
            search_only: false,
        }
    }
}

pub fn compose_rest_uri(secured: bool, host: &str, port: u16) -> String {
    let scheme = if secured { "https" } else { "http" };
    format!("{}://{}:{}", scheme, host, port)
}

pub struct NodeRegistry {
    store: Arc<dyn ConfigStore>,
}

impl NodeRegistry {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    fn path(name: &str, key: &'static str) -> StorePath {
        StorePath::new(Group::Node, name, key)
    }

    async fn read<T>(&self, name: &str, key: &'static str) -> SettingsResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.store.get(&Self::path(name, key)).await? {
            Some(raw) => raw,
            None => defaults::lookup(Group::Node, key)
                .cloned()
                .unwrap_or(Value::Null),
        };
        if raw.is_null() {
            // Only optional fields default to null.
            return Ok(T::default());
        }
        serde_json::from_value(raw).map_err(|source| SettingsError::Decode { key, source })
    }

    async fn write<T>(&self, name: &str, key: &'static str, value: &T) -> SettingsResult<()>
    where
        T: Serialize + Sync,
    {
        let raw =
            serde_json::to_value(value).map_err(|source| SettingsError::Decode { key, source })?;
        self.store.set(&Self::path(name, key), raw).await?;
        Ok(())
    }

    /// Names of every configured node.
    pub async fn get_all_identifiers(&self) -> SettingsResult<BTreeSet<String>> {
        Ok(self.store.enumerate_children(Group::Node).await?)
    }

    /// Fails with [`SettingsError::UnknownNode`] unless `name` is configured.
    pub async fn ensure_exists(&self, name: &str) -> SettingsResult<()> {
        if self.get_all_identifiers().await?.contains(name) {
            Ok(())
        } else {
            warn!("Rejected operation on unknown node {:?}", name);
            Err(SettingsError::UnknownNode(name.to_string()))
        }
    }

    /// Writes every field of `config` under `name`, creating the node.
    pub async fn add_node(&self, name: &str, config: &NodeConfig) -> SettingsResult<()> {
        let rest_uri = compose_rest_uri(config.secured, &config.host, config.port);
        self.write(name, HOST, &config.host).await?;
        self.write(name, PORT, &config.port).await?;
        self.write(name, PASSWORD, &config.password).await?;
        self.write(name, SECURED, &config.secured).await?;
        self.write(name, REGION, &config.region).await?;
        self.write(name, SHARD_ID, &config.shard_id).await?;
        self.write(name, SEARCH_ONLY, &config.search_only).await?;
        self.write(name, REST_URI, &rest_uri).await?;
        info!("Registered node {:?} at {}", name, rest_uri);
        Ok(())
    }

    pub async fn remove_node(&self, name: &str) -> SettingsResult<()> {
        self.ensure_exists(name).await?;
        for key in [HOST, PORT, PASSWORD, SECURED, REGION, SHARD_ID, SEARCH_ONLY, REST_URI] {
            self.store.clear(&Self::path(name, key)).await?;
        }
        info!("Removed node {:?}", name);
        Ok(())
    }

    /// Registers the primary node with defaults if no node exists yet.
    pub async fn ensure_primary(&self) -> SettingsResult<()> {
        if self.get_all_identifiers().await?.is_empty() {
            self.add_node(PRIMARY_NODE, &NodeConfig::default()).await?;
        }
        Ok(())
    }

    pub async fn get_node(&self, name: &str) -> SettingsResult<NodeConfig> {
        self.ensure_exists(name).await?;
        Ok(NodeConfig {
            host: self.read(name, HOST).await?,
            port: self.read(name, PORT).await?,
            password: self.read(name, PASSWORD).await?,
            secured: self.read(name, SECURED).await?,
            rest_uri: self.read(name, REST_URI).await?,
            region: self.read(name, REGION).await?,
            shard_id: self.read(name, SHARD_ID).await?,
            search_only: self.read(name, SEARCH_ONLY).await?,
        })
    }

    async fn address(&self, name: &str) -> SettingsResult<(bool, String, u16)> {
        Ok((
            self.read(name, SECURED).await?,
            self.read(name, HOST).await?,
            self.read(name, PORT).await?,
        ))
    }

    /// Writes `value` to one of the address fields, then `rest_uri`. The old
    /// field value is restored when the URI cannot be written.
    async fn write_address<T>(
        &self,
        name: &str,
        key: &'static str,
        value: &T,
        previous: &T,
        rest_uri: String,
    ) -> SettingsResult<String>
    where
        T: Serialize + Sync,
    {
        self.write(name, key, value).await?;
        if let Err(e) = self.write(name, REST_URI, &rest_uri).await {
            error!("Failed to update rest_uri of node {:?}: {}", name, e);
            if let Err(rollback) = self.write(name, key, previous).await {
                error!("Failed to restore {} of node {:?}: {}", key, name, rollback);
            }
            return Err(e);
        }
        info!("Node {:?} now at {}", name, rest_uri);
        Ok(rest_uri)
    }

    pub async fn get_host(&self, name: &str) -> SettingsResult<String> {
        self.ensure_exists(name).await?;
        self.read(name, HOST).await
    }

    pub async fn set_host(&self, name: &str, host: &str) -> SettingsResult<String> {
        self.ensure_exists(name).await?;
        let (secured, previous, port) = self.address(name).await?;
        let rest_uri = compose_rest_uri(secured, host, port);
        self.write_address(name, HOST, &host.to_string(), &previous, rest_uri)
            .await
    }

    pub async fn get_port(&self, name: &str) -> SettingsResult<u16> {
        self.ensure_exists(name).await?;
        self.read(name, PORT).await
    }

    pub async fn set_port(&self, name: &str, port: u16) -> SettingsResult<String> {
        self.ensure_exists(name).await?;
        let (secured, host, previous) = self.address(name).await?;
        let rest_uri = compose_rest_uri(secured, &host, port);
        self.write_address(name, PORT, &port, &previous, rest_uri)
            .await
    }

    pub async fn get_secured(&self, name: &str) -> SettingsResult<bool> {
        self.ensure_exists(name).await?;
        self.read(name, SECURED).await
    }

    pub async fn set_secured(&self, name: &str, secured: bool) -> SettingsResult<String> {
        self.ensure_exists(name).await?;
        let (previous, host, port) = self.address(name).await?;
        let rest_uri = compose_rest_uri(secured, &host, port);
        self.write_address(name, SECURED, &secured, &previous, rest_uri)
            .await
    }

    pub async fn get_rest_uri(&self, name: &str) -> SettingsResult<String> {
        self.ensure_exists(name).await?;
        self.read(name, REST_URI).await
    }

    pub async fn get_password(&self, name: &str) -> SettingsResult<String> {
        self.ensure_exists(name).await?;
        self.read(name, PASSWORD).await
    }

    pub async fn set_password(&self, name: &str, password: &str) -> SettingsResult<()> {
        self.ensure_exists(name).await?;
        self.write(name, PASSWORD, &password).await
    }

    pub async fn get_region(&self, name: &str) -> SettingsResult<String> {
        self.ensure_exists(name).await?;
        self.read(name, REGION).await
    }

    pub async fn set_region(&self, name: &str, region: &str) -> SettingsResult<()> {
        self.ensure_exists(name).await?;
        self.write(name, REGION, &region).await
    }

    pub async fn get_shard_id(&self, name: &str) -> SettingsResult<Option<u64>> {
        self.ensure_exists(name).await?;
        self.read(name, SHARD_ID).await
    }

    pub async fn set_shard_id(&self, name: &str, shard_id: Option<u64>) -> SettingsResult<()> {
        self.ensure_exists(name).await?;
        self.write(name, SHARD_ID, &shard_id).await
    }

    pub async fn get_search_only(&self, name: &str) -> SettingsResult<bool> {
        self.ensure_exists(name).await?;
        self.read(name, SEARCH_ONLY).await
    }

    pub async fn set_search_only(&self, name: &str, search_only: bool) -> SettingsResult<()> {
        self.ensure_exists(name).await?;
        self.write(name, SEARCH_ONLY, &search_only).await
    }
}
