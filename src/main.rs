mod args;
mod config;
mod context;
mod discord;
mod embed;
mod event;
mod handler;
mod helper;
mod logging;
mod permission;
mod plugin;
mod recent;
mod serenity_api;
#[cfg(test)]
mod testing;

use serenity::{all::GatewayIntents, Client};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cfg = crate::config::Config::load().await?;
    let token = cfg.discord_token.clone();
    log_internal!(
        "Serving guild {} with prefixes {:?}",
        cfg.general.guild_id,
        cfg.general.command_prefixes
    );
    let handler = handler::Handler::new(cfg);

    // Things we want discord to tell us about.
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    Client::builder(&token, intents)
        .event_handler(handler)
        .await?
        .start()
        .await
        .map_err(Into::into)
}
