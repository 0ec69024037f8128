//! Owner commands for the Lavalink node registry.

use futures::{Stream, StreamExt};
use tracing::{error, info};

use super::embeds;
use crate::settings::SettingsError;
use crate::settings::nodes::PRIMARY_NODE;
use crate::{CommandResult, Context, is_owner};

/// Inspect and edit Lavalink nodes.
#[poise::command(slash_command, subcommands("show", "host", "port"), subcommand_required)]
pub async fn node(_ctx: Context<'_>) -> CommandResult {
    Ok(())
}

/// Suggests configured node names starting with the typed text.
async fn autocomplete_node<'a>(
    ctx: Context<'_>,
    partial: &'a str,
) -> impl Stream<Item = String> + 'a {
    let names = match ctx.data().config_cache.node_config.get_all_identifiers().await {
        Ok(names) => names,
        Err(e) => {
            error!("Error listing nodes for autocomplete: {}", e);
            Default::default()
        }
    };

    futures::stream::iter(names)
        .filter(move |name| futures::future::ready(name.starts_with(partial)))
}

/// Replies with an error embed when `result` names an unknown node, and hands
/// any other error back to the framework.
async fn reply_unknown_node<T>(
    ctx: Context<'_>,
    result: Result<T, SettingsError>,
) -> Result<Option<T>, crate::Error> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(SettingsError::UnknownNode(name)) => {
            ctx.send(embeds::error(format!("No node named `{}` is configured.", name)))
                .await?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Show a node's configuration.
#[poise::command(slash_command, check = "is_owner")]
pub async fn show(
    ctx: Context<'_>,
    #[description = "Node name"]
    #[autocomplete = "autocomplete_node"]
    name: Option<String>,
) -> CommandResult {
    let name = name.unwrap_or_else(|| PRIMARY_NODE.to_string());
    let result = ctx.data().config_cache.node_config.get_node(&name).await;
    if let Some(node) = reply_unknown_node(ctx, result).await? {
        ctx.send(embeds::node_summary(&name, &node).ephemeral(true))
            .await?;
    }
    Ok(())
}

/// Change the host a node is reached at.
#[poise::command(slash_command, check = "is_owner")]
pub async fn host(
    ctx: Context<'_>,
    #[description = "Node name"]
    #[autocomplete = "autocomplete_node"]
    name: String,
    #[description = "Hostname or IP address"] host: String,
) -> CommandResult {
    let host = host.trim();
    if host.is_empty() || host.contains(char::is_whitespace) {
        ctx.send(embeds::error("Provide a hostname without spaces.")).await?;
        return Ok(());
    }

    let result = ctx.data().config_cache.node_config.set_host(&name, host).await;
    if let Some(rest_uri) = reply_unknown_node(ctx, result).await? {
        info!("Node {:?} now reachable at {}", name, rest_uri);
        ctx.send(embeds::setting_updated(
            "Node host",
            format!("`{}` now uses `{}`.", name, rest_uri),
        ))
        .await?;
    }
    Ok(())
}

/// Change the port a node listens on.
#[poise::command(slash_command, check = "is_owner")]
pub async fn port(
    ctx: Context<'_>,
    #[description = "Node name"]
    #[autocomplete = "autocomplete_node"]
    name: String,
    #[description = "Port (1-65535)"] port: u16,
) -> CommandResult {
    if port == 0 {
        ctx.send(embeds::out_of_range("port", 1, u16::MAX.into())).await?;
        return Ok(());
    }

    let result = ctx.data().config_cache.node_config.set_port(&name, port).await;
    if let Some(rest_uri) = reply_unknown_node(ctx, result).await? {
        info!("Node {:?} now reachable at {}", name, rest_uri);
        ctx.send(embeds::setting_updated(
            "Node port",
            format!("`{}` now uses `{}`.", name, rest_uri),
        ))
        .await?;
    }
    Ok(())
}
