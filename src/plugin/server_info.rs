use crate::{
    config::Config,
    discord::Reply,
    embed::{self, Requester},
    event::*,
    plugin::*,
};
use anyhow::Result;

pub struct ServerInfo;

#[serenity::async_trait]
impl Plugin for ServerInfo {
    fn name(&self) -> &'static str {
        "serverinfo"
    }

    fn usage(&self, cfg: &Config) -> Option<String> {
        Some(usage_line(cfg, self.name(), "", "show information about this server"))
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()) else {
            return Ok(EventHandled::No);
        };

        let Some(guild_id) = msg.guild_id else {
            ctx.discord
                .send(
                    msg.channel_id,
                    Reply::text("❌ This command only works in servers."),
                )
                .await?;
            return Ok(EventHandled::Yes);
        };

        let Some(guild) = ctx.discord.guild(guild_id).await else {
            ctx.discord
                .send(
                    msg.channel_id,
                    Reply::text("❌ Server information is not available right now."),
                )
                .await?;
            return Ok(EventHandled::Yes);
        };
        let requester = Requester {
            name: &msg.author_name,
            avatar_url: &msg.author_avatar,
        };
        let info = embed::server_info(&guild, &requester, chrono::Utc::now());

        ctx.discord.send(msg.channel_id, Reply::Embed(info)).await?;
        Ok(EventHandled::Yes)
    }
}
