use crate::{config::Config, event::*, log_internal, plugin::*};
use anyhow::Result;

/// Runs on every (re)connection: syncs slash commands to the configured guild and asks for its
/// member list.  Both are overwrites, so repeating them on reconnect is harmless.
pub struct Ready;

#[serenity::async_trait]
impl Plugin for Ready {
    fn name(&self) -> &'static str {
        "ready"
    }

    fn usage(&self, _cfg: &Config) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Event::Ready { user_name, .. } = event else {
            return Ok(EventHandled::No);
        };

        let guild_id = ctx.cfg.general.guild_id;
        let commands: Vec<_> = plugins().iter().filter_map(|plugin| plugin.slash()).collect();
        ctx.discord.register_commands(guild_id, &commands).await?;
        ctx.discord.request_members(guild_id).await;

        log_internal!(
            "Logged in as {}, {} slash command(s) synced to {}",
            user_name,
            commands.len(),
            guild_id
        );
        Ok(EventHandled::Yes)
    }
}
