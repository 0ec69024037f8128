//! Static default values per `(group, key)`.

use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::LazyLock;

use super::store::Group;

static DEFAULTS: LazyLock<HashMap<(Group, &'static str), Value>> = LazyLock::new(|| {
    let global = [
        ("max_volume", json!(250)),
        ("max_queue_size", json!(10_000)),
        ("maxlength", json!(0)),
        ("thumbnail", json!(false)),
        ("disconnect", json!(false)),
        ("emptydc_enabled", json!(false)),
        ("emptypause_enabled", json!(false)),
        ("auto_deafen", json!(false)),
        ("jukebox", json!(false)),
        ("restrict", json!(false)),
        ("persist_queue", json!(false)),
        ("prefer_lyrics", json!(false)),
        ("notify", json!(false)),
        ("daily_playlists", json!(false)),
        ("emptydc_timer", json!(0)),
        ("emptypause_timer", json!(0)),
        ("jukebox_price", json!(0)),
        ("country_code", json!("US")),
        ("localpath", json!("/")),
        ("status", json!(false)),
        ("use_external_lavalink", json!(false)),
        ("global_db_enabled", json!(false)),
        ("global_db_get_timeout", json!(5)),
        ("cache_level", json!(0)),
        ("cache_age", json!(365)),
        ("url_keyword_whitelist", json!([])),
        ("url_keyword_blacklist", json!([])),
    ];
    let guild = [
        ("max_volume", json!(150)),
        ("max_queue_size", json!(10_000)),
        ("maxlength", json!(0)),
        ("thumbnail", json!(false)),
        ("disconnect", json!(false)),
        ("emptydc_enabled", json!(false)),
        ("emptypause_enabled", json!(false)),
        ("auto_deafen", json!(true)),
        ("jukebox", json!(false)),
        ("restrict", json!(true)),
        ("persist_queue", json!(true)),
        ("prefer_lyrics", json!(false)),
        ("notify", json!(false)),
        ("daily_playlists", json!(false)),
        ("emptydc_timer", json!(0)),
        ("emptypause_timer", json!(0)),
        ("jukebox_price", json!(0)),
        ("dj_enabled", json!(false)),
        ("auto_play", json!(false)),
        ("repeat", json!(false)),
        ("shuffle", json!(false)),
        ("shuffle_bumped", json!(true)),
        ("vote_enabled", json!(false)),
        ("vote_percent", json!(0)),
        ("country_code", json!(null)),
        ("url_keyword_whitelist", json!([])),
        ("url_keyword_blacklist", json!([])),
        ("dj_role", json!([])),
        ("admin_role", json!([])),
        ("mod_role", json!([])),
    ];
    // A channel cap of 0 defers to the guild.
    let channel = [("max_volume", json!(0))];
    let user = [("country_code", json!(null))];
    let node = [
        ("host", json!("localhost")),
        ("port", json!(2333)),
        ("password", json!("youshallnotpass")),
        ("secured", json!(false)),
        ("rest_uri", json!("http://localhost:2333")),
        ("region", json!("")),
        ("shard_id", json!(null)),
        ("search_only", json!(false)),
    ];

    let mut table = HashMap::new();
    for (group, entries) in [
        (Group::Global, &global[..]),
        (Group::Guild, &guild[..]),
        (Group::Channel, &channel[..]),
        (Group::User, &user[..]),
        (Group::Node, &node[..]),
    ] {
        for (key, value) in entries {
            table.insert((group, *key), value.clone());
        }
    }
    table
});

/// The static default for `key` in `group`, if one is declared.
pub fn lookup(group: Group, key: &'static str) -> Option<&'static Value> {
    DEFAULTS.get(&(group, key))
}
