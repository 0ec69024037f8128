//! Descriptors for every setting the engine manages.

use std::collections::BTreeSet;
use std::marker::PhantomData;

use super::Scope;
use super::resolver::Enforcement;

const G: &[Scope] = &[Scope::Global];
const GU: &[Scope] = &[Scope::Guild];
const G_GU: &[Scope] = &[Scope::Global, Scope::Guild];
const G_GU_CH: &[Scope] = &[Scope::Global, Scope::Guild, Scope::Channel];
const G_GU_U: &[Scope] = &[Scope::Global, Scope::Guild, Scope::User];

/// A named setting with a value type, an enforcement mode and the scopes it
/// can be configured at.
#[derive(Debug)]
pub struct Setting<V> {
    pub name: &'static str,
    pub enforcement: Enforcement,
    pub scopes: &'static [Scope],
    _value: PhantomData<fn() -> V>,
}

impl<V> Setting<V> {
    pub const fn new(name: &'static str, enforcement: Enforcement, scopes: &'static [Scope]) -> Self {
        Self {
            name,
            enforcement,
            scopes,
            _value: PhantomData,
        }
    }

    pub fn supports(&self, scope: Scope) -> bool {
        self.scopes.contains(&scope)
    }
}

impl<V> Clone for Setting<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Setting<V> {}

// Numeric ceilings. 0 means no limit at any scope.
pub const MAX_VOLUME: Setting<u64> = Setting::new("max_volume", Enforcement::Cap, G_GU_CH);
pub const MAX_QUEUE_SIZE: Setting<u64> =
    Setting::new("max_queue_size", Enforcement::Cap, G_GU);
pub const MAX_TRACK_LENGTH: Setting<u64> = Setting::new("maxlength", Enforcement::Cap, G_GU);

// Toggles a bot owner can force on for every guild.
pub const THUMBNAIL: Setting<bool> = Setting::new("thumbnail", Enforcement::Lock, G_GU);
pub const DISCONNECT: Setting<bool> = Setting::new("disconnect", Enforcement::Lock, G_GU);
pub const EMPTY_DC: Setting<bool> = Setting::new("emptydc_enabled", Enforcement::Lock, G_GU);
pub const EMPTY_PAUSE: Setting<bool> =
    Setting::new("emptypause_enabled", Enforcement::Lock, G_GU);
pub const AUTO_DEAFEN: Setting<bool> = Setting::new("auto_deafen", Enforcement::Lock, G_GU);
pub const JUKEBOX: Setting<bool> = Setting::new("jukebox", Enforcement::Lock, G_GU);
pub const URL_RESTRICT: Setting<bool> = Setting::new("restrict", Enforcement::Lock, G_GU);
pub const PERSISTENT_QUEUE: Setting<bool> =
    Setting::new("persist_queue", Enforcement::Lock, G_GU);
pub const PREFER_LYRICS: Setting<bool> = Setting::new("prefer_lyrics", Enforcement::Lock, G_GU);
pub const NOTIFY: Setting<bool> = Setting::new("notify", Enforcement::Lock, G_GU);
pub const DAILY_PLAYLIST: Setting<bool> =
    Setting::new("daily_playlists", Enforcement::Lock, G_GU);

// Numbers where 0 turns the feature off.
pub const EMPTY_DC_TIMER: Setting<u64> = Setting::new("emptydc_timer", Enforcement::Lock, G_GU);
pub const EMPTY_PAUSE_TIMER: Setting<u64> =
    Setting::new("emptypause_timer", Enforcement::Lock, G_GU);
pub const JUKEBOX_PRICE: Setting<u64> = Setting::new("jukebox_price", Enforcement::Lock, G_GU);

// Guild-only.
pub const DJ_STATUS: Setting<bool> = Setting::new("dj_enabled", Enforcement::None, GU);
pub const AUTOPLAY: Setting<bool> = Setting::new("auto_play", Enforcement::None, GU);
pub const REPEAT: Setting<bool> = Setting::new("repeat", Enforcement::None, GU);
pub const SHUFFLE: Setting<bool> = Setting::new("shuffle", Enforcement::None, GU);
pub const SHUFFLE_BUMPED: Setting<bool> = Setting::new("shuffle_bumped", Enforcement::None, GU);
pub const VOTES: Setting<bool> = Setting::new("vote_enabled", Enforcement::None, GU);
pub const VOTES_PERCENTAGE: Setting<u64> = Setting::new("vote_percent", Enforcement::None, GU);

pub const COUNTRY_CODE: Setting<Option<String>> =
    Setting::new("country_code", Enforcement::None, G_GU_U);

// Global-only.
pub const LOCAL_PATH: Setting<String> = Setting::new("localpath", Enforcement::None, G);
pub const STATUS: Setting<bool> = Setting::new("status", Enforcement::None, G);
pub const EXTERNAL_LAVALINK_SERVER: Setting<bool> =
    Setting::new("use_external_lavalink", Enforcement::None, G);
pub const GLOBAL_API: Setting<bool> = Setting::new("global_db_enabled", Enforcement::None, G);
pub const GLOBAL_API_TIMEOUT: Setting<u64> =
    Setting::new("global_db_get_timeout", Enforcement::None, G);
pub const LOCAL_CACHE_LEVEL: Setting<u64> = Setting::new("cache_level", Enforcement::None, G);
pub const LOCAL_CACHE_AGE: Setting<u64> = Setting::new("cache_age", Enforcement::None, G);

// Sets.
pub const KEYWORD_WHITELIST: Setting<BTreeSet<String>> =
    Setting::new("url_keyword_whitelist", Enforcement::Additive, G_GU);
pub const KEYWORD_BLACKLIST: Setting<BTreeSet<String>> =
    Setting::new("url_keyword_blacklist", Enforcement::Additive, G_GU);
pub const DJ_ROLES: Setting<BTreeSet<u64>> = Setting::new("dj_role", Enforcement::Additive, GU);
pub const ADMIN_ROLES: Setting<BTreeSet<u64>> = Setting::new("admin_role", Enforcement::None, GU);
pub const MOD_ROLES: Setting<BTreeSet<u64>> = Setting::new("mod_role", Enforcement::None, GU);
