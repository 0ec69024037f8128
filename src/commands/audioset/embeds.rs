use poise::CreateReply;
use serenity::all::CreateEmbed;

use crate::settings::keywords::Keywords;
use crate::settings::nodes::NodeConfig;

const SUCCESS: u32 = 0x00ff00;
const FAILURE: u32 = 0xff0000;
const INFO: u32 = 0x3498db;

/// Create an embed confirming a settings change
pub fn setting_updated(title: &str, description: impl Into<String>) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title(format!("⚙️ {}", title))
            .description(description)
            .color(SUCCESS),
    )
}

/// Create an ephemeral error embed
pub fn error(description: impl Into<String>) -> CreateReply {
    CreateReply::default()
        .embed(
            CreateEmbed::new()
                .title("❌ Error")
                .description(description)
                .color(FAILURE),
        )
        .ephemeral(true)
}

/// Create an embed for a global lock that masks the server's value
pub fn locked_by_global(setting: &str) -> CreateReply {
    error(format!(
        "The bot owner has locked `{}` globally; server changes would have no effect.",
        setting
    ))
}

/// Create an embed for a value outside its accepted range
pub fn out_of_range(setting: &str, min: u64, max: u64) -> CreateReply {
    error(format!("`{}` must be between {} and {}.", setting, min, max))
}

/// Create an embed listing keywords
pub fn keyword_list(title: &str, keywords: &Keywords) -> CreateReply {
    let description = if keywords.is_empty() {
        "*Empty*".to_string()
    } else {
        keywords
            .iter()
            .map(|keyword| format!("• `{}`", keyword))
            .collect::<Vec<_>>()
            .join("\n")
    };

    CreateReply::default().embed(
        CreateEmbed::new()
            .title(format!("📋 {}", title))
            .description(description)
            .color(INFO),
    )
}

/// Create an embed describing one Lavalink node. The password is never shown.
pub fn node_summary(name: &str, node: &NodeConfig) -> CreateReply {
    let shard = node
        .shard_id
        .map_or_else(|| "any".to_string(), |shard| shard.to_string());
    let region = if node.region.is_empty() {
        "any"
    } else {
        node.region.as_str()
    };

    CreateReply::default().embed(
        CreateEmbed::new()
            .title(format!("🛰️ Node `{}`", name))
            .field("Host", format!("`{}`", node.host), true)
            .field("Port", format!("`{}`", node.port), true)
            .field("Secured", format!("`{}`", node.secured), true)
            .field("REST URI", format!("`{}`", node.rest_uri), false)
            .field("Region", format!("`{}`", region), true)
            .field("Shard", format!("`{}`", shard), true)
            .field("Search only", format!("`{}`", node.search_only), true)
            .color(INFO),
    )
}

/// Create an embed with one field per effective setting
pub fn settings_summary(title: &str, fields: Vec<(&str, String)>) -> CreateReply {
    let embed = fields.into_iter().fold(
        CreateEmbed::new().title(format!("🎛️ {}", title)).color(INFO),
        |embed, (name, value)| embed.field(name, value, true),
    );
    CreateReply::default().embed(embed)
}
