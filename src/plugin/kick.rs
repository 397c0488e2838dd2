use crate::{
    args::ArgError,
    config::Config,
    discord::{Outcome, Reply},
    event::*,
    log_internal,
    plugin::*,
};
use anyhow::Result;
use serenity::all::{Mentionable, Permissions};

const DEFAULT_REASON: &str = "No reason provided";
const SYNOPSIS: &str = "<member> [reason]";

pub struct Kick;

#[serenity::async_trait]
impl Plugin for Kick {
    fn name(&self) -> &'static str {
        "kick"
    }

    fn usage(&self, cfg: &Config) -> Option<String> {
        Some(usage_line(
            cfg,
            self.name(),
            SYNOPSIS,
            "kick a member (Kick Members)",
        ))
    }

    fn permissions(&self) -> Permissions {
        Permissions::KICK_MEMBERS
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Some((msg, args)) = event.is_bot_cmd(ctx, self.name()) else {
            return Ok(EventHandled::No);
        };
        let usage = command_usage(ctx.cfg, self.name(), SYNOPSIS);

        let target = match msg.guild_id {
            Some(guild_id) => args
                .member(ctx, guild_id, 0, "member")
                .await
                .map(|member| (guild_id, member)),
            None => Err(ArgError::NotInGuild),
        };
        let (guild_id, member) = match target {
            Ok(target) => target,
            Err(err) => {
                ctx.discord
                    .send(msg.channel_id, Reply::Text(err.reply(&usage)))
                    .await?;
                return Ok(EventHandled::Yes);
            }
        };
        let reason = args.rest(1).unwrap_or(DEFAULT_REASON);

        let reply = match ctx.discord.kick(guild_id, member.id, reason).await? {
            Outcome::Done => {
                log_internal!(
                    "{} kicked {} from {}: {}",
                    msg.author_name,
                    member.display_name,
                    guild_id,
                    reason
                );
                format!(
                    "👢 **Kicked** {}\n📄 Reason: {}",
                    member.id.mention(),
                    reason
                )
            }
            Outcome::Denied | Outcome::DmUnavailable => {
                "❌ I don’t have permission to kick this user.".to_owned()
            }
        };
        ctx.discord.send(msg.channel_id, Reply::Text(reply)).await?;
        Ok(EventHandled::Yes)
    }
}
