use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use serenity::model::id::UserId;
use tracing::info;

use super::keys::{self, Setting};
use super::keywords::KeywordFilter;
use super::manager::SettingManager;
use super::nodes::NodeRegistry;
use super::roles::{DjRolesManager, PrivilegeManager};
use super::store::ConfigStore;
use super::value::SettingValue;

/// Options that shape how the engine caches.
#[derive(Debug, Clone)]
pub struct CacheOptions {
    pub enable_cache: bool,
    pub role_cache_ttl: Duration,
    pub owners: BTreeSet<UserId>,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            enable_cache: true,
            role_cache_ttl: Duration::from_secs(60),
            owners: BTreeSet::new(),
        }
    }
}

fn build<V: SettingValue>(
    setting: Setting<V>,
    store: &Arc<dyn ConfigStore>,
    cached: bool,
) -> SettingManager<V> {
    SettingManager::new(setting, Arc::clone(store), cached)
}

/// Every setting manager, built once per process over one store.
pub struct ConfigCache {
    pub volume: SettingManager<u64>,
    pub max_queue_size: SettingManager<u64>,
    pub max_track_length: SettingManager<u64>,

    pub thumbnail: SettingManager<bool>,
    pub disconnect: SettingManager<bool>,
    pub empty_dc: SettingManager<bool>,
    pub empty_pause: SettingManager<bool>,
    pub auto_deafen: SettingManager<bool>,
    pub jukebox: SettingManager<bool>,
    pub url_restrict: SettingManager<bool>,
    pub persistent_queue: SettingManager<bool>,
    pub prefer_lyrics: SettingManager<bool>,
    pub notify: SettingManager<bool>,
    pub daily_playlist: SettingManager<bool>,

    pub empty_dc_timer: SettingManager<u64>,
    pub empty_pause_timer: SettingManager<u64>,
    pub jukebox_price: SettingManager<u64>,

    pub dj_status: SettingManager<bool>,
    pub autoplay: SettingManager<bool>,
    pub repeat: SettingManager<bool>,
    pub shuffle: SettingManager<bool>,
    pub shuffle_bumped: SettingManager<bool>,
    pub votes: SettingManager<bool>,
    pub votes_percentage: SettingManager<u64>,

    pub country_code: SettingManager<Option<String>>,

    pub local_path: SettingManager<String>,
    pub status: SettingManager<bool>,
    pub external_lavalink_server: SettingManager<bool>,
    pub global_api: SettingManager<bool>,
    pub global_api_timeout: SettingManager<u64>,
    pub local_cache_level: SettingManager<u64>,
    pub local_cache_age: SettingManager<u64>,

    pub blacklist_whitelist: KeywordFilter,
    pub dj_roles: DjRolesManager,
    pub privileges: PrivilegeManager,
    pub node_config: NodeRegistry,
}

impl ConfigCache {
    pub fn new(store: Arc<dyn ConfigStore>, options: CacheOptions) -> Self {
        let cached = options.enable_cache;

        info!(
            "Building settings engine (cache {})",
            if cached { "enabled" } else { "disabled" }
        );

        Self {
            volume: build(keys::MAX_VOLUME, &store, cached),
            max_queue_size: build(keys::MAX_QUEUE_SIZE, &store, cached),
            max_track_length: build(keys::MAX_TRACK_LENGTH, &store, cached),

            thumbnail: build(keys::THUMBNAIL, &store, cached),
            disconnect: build(keys::DISCONNECT, &store, cached),
            empty_dc: build(keys::EMPTY_DC, &store, cached),
            empty_pause: build(keys::EMPTY_PAUSE, &store, cached),
            auto_deafen: build(keys::AUTO_DEAFEN, &store, cached),
            jukebox: build(keys::JUKEBOX, &store, cached),
            url_restrict: build(keys::URL_RESTRICT, &store, cached),
            persistent_queue: build(keys::PERSISTENT_QUEUE, &store, cached),
            prefer_lyrics: build(keys::PREFER_LYRICS, &store, cached),
            notify: build(keys::NOTIFY, &store, cached),
            daily_playlist: build(keys::DAILY_PLAYLIST, &store, cached),

            empty_dc_timer: build(keys::EMPTY_DC_TIMER, &store, cached),
            empty_pause_timer: build(keys::EMPTY_PAUSE_TIMER, &store, cached),
            jukebox_price: build(keys::JUKEBOX_PRICE, &store, cached),

            dj_status: build(keys::DJ_STATUS, &store, cached),
            autoplay: build(keys::AUTOPLAY, &store, cached),
            repeat: build(keys::REPEAT, &store, cached),
            shuffle: build(keys::SHUFFLE, &store, cached),
            shuffle_bumped: build(keys::SHUFFLE_BUMPED, &store, cached),
            votes: build(keys::VOTES, &store, cached),
            votes_percentage: build(keys::VOTES_PERCENTAGE, &store, cached),

            country_code: build(keys::COUNTRY_CODE, &store, cached),

            local_path: build(keys::LOCAL_PATH, &store, cached),
            status: build(keys::STATUS, &store, cached),
            external_lavalink_server: build(keys::EXTERNAL_LAVALINK_SERVER, &store, cached),
            global_api: build(keys::GLOBAL_API, &store, cached),
            global_api_timeout: build(keys::GLOBAL_API_TIMEOUT, &store, cached),
            local_cache_level: build(keys::LOCAL_CACHE_LEVEL, &store, cached),
            local_cache_age: build(keys::LOCAL_CACHE_AGE, &store, cached),

            blacklist_whitelist: KeywordFilter::new(store.clone(), cached),
            dj_roles: DjRolesManager::new(store.clone(), cached),
            privileges: PrivilegeManager::new(
                store.clone(),
                cached,
                options.role_cache_ttl,
                options.owners,
            ),
            node_config: NodeRegistry::new(store),
        }
    }

    /// Drops every cached global value and every timed role lookup.
    pub fn reset_globals(&self) {
        self.volume.reset_globals();
        self.max_queue_size.reset_globals();
        self.max_track_length.reset_globals();
        self.thumbnail.reset_globals();
        self.disconnect.reset_globals();
        self.empty_dc.reset_globals();
        self.empty_pause.reset_globals();
        self.auto_deafen.reset_globals();
        self.jukebox.reset_globals();
        self.url_restrict.reset_globals();
        self.persistent_queue.reset_globals();
        self.prefer_lyrics.reset_globals();
        self.notify.reset_globals();
        self.daily_playlist.reset_globals();
        self.empty_dc_timer.reset_globals();
        self.empty_pause_timer.reset_globals();
        self.jukebox_price.reset_globals();
        self.country_code.reset_globals();
        self.local_path.reset_globals();
        self.status.reset_globals();
        self.external_lavalink_server.reset_globals();
        self.global_api.reset_globals();
        self.global_api_timeout.reset_globals();
        self.local_cache_level.reset_globals();
        self.local_cache_age.reset_globals();
        self.blacklist_whitelist.reset_globals();
        self.privileges.reset_globals();
        info!("Reset cached global settings");
    }
}
