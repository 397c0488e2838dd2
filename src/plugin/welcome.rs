use crate::{
    config::Config,
    discord::Reply,
    embed,
    event::*,
    plugin::*,
};
use anyhow::Result;

/// DMs the rules to whoever joins the configured guild
pub struct Welcome;

#[serenity::async_trait]
impl Plugin for Welcome {
    fn name(&self) -> &'static str {
        "welcome"
    }

    fn usage(&self, _cfg: &Config) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Event::MemberJoin { guild_id, user_id } = event else {
            return Ok(EventHandled::No);
        };
        if !ctx.cfg.is_target_guild(Some(*guild_id)) {
            return Ok(EventHandled::Yes);
        }

        // A refused DM is dropped quietly
        ctx.discord
            .direct_message(*user_id, Reply::Embed(embed::rules()))
            .await?;
        Ok(EventHandled::Yes)
    }
}
