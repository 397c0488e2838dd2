use crate::{config::Config, discord::Reply, embed, event::*, plugin::*};
use anyhow::Result;

const IP_NOT_SET: &str = "❌ Server IP is not set.";

/// Shows the game server address
pub struct Ip;

#[serenity::async_trait]
impl Plugin for Ip {
    fn name(&self) -> &'static str {
        "ip"
    }

    fn usage(&self, cfg: &Config) -> Option<String> {
        Some(usage_line(cfg, self.name(), "", "show the Minecraft server address"))
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()) else {
            return Ok(EventHandled::No);
        };

        let reply = match &ctx.cfg.general.server_ip {
            Some(address) => Reply::Embed(embed::server_ip(address)),
            None => Reply::text(IP_NOT_SET),
        };
        ctx.discord.send(msg.channel_id, reply).await?;
        Ok(EventHandled::Yes)
    }
}
