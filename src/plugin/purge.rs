use crate::{
    args::ArgError,
    config::Config,
    discord::{Purge, Reply},
    event::*,
    helper::{log_channel, purged_count},
    log_internal,
    plugin::*,
};
use anyhow::Result;
use serenity::all::{ChannelId, Mentionable, Permissions, UserId};
use std::ops::RangeInclusive;

const SYNOPSIS: &str = "<amount>";
const AMOUNT_RANGE: RangeInclusive<i64> = 1..=100;

/// Deletes the most recent messages of a channel, the command included
pub struct PurgeMessages;

#[serenity::async_trait]
impl Plugin for PurgeMessages {
    fn name(&self) -> &'static str {
        "purge"
    }

    fn usage(&self, cfg: &Config) -> Option<String> {
        Some(usage_line(
            cfg,
            self.name(),
            SYNOPSIS,
            "delete the last 1-100 messages here (Manage Messages)",
        ))
    }

    fn permissions(&self) -> Permissions {
        Permissions::MANAGE_MESSAGES
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Some((msg, args)) = event.is_bot_cmd(ctx, self.name()) else {
            return Ok(EventHandled::No);
        };

        let amount = match args.integer(0, "amount") {
            Ok(amount) => Some(amount).filter(|amount| AMOUNT_RANGE.contains(amount)),
            Err(ArgError::OutOfRange(_)) => None,
            Err(err) => {
                let usage = command_usage(ctx.cfg, self.name(), SYNOPSIS);
                ctx.discord
                    .send(msg.channel_id, Reply::Text(err.reply(&usage)))
                    .await?;
                return Ok(EventHandled::Yes);
            }
        };
        let Some(amount) = amount else {
            ctx.discord
                .send(
                    msg.channel_id,
                    Reply::text("❌ Purge amount must be between 1 and 100."),
                )
                .await?;
            return Ok(EventHandled::Yes);
        };

        // One extra for the command message itself
        let limit = amount as usize + 1;
        let deleted = match ctx.discord.purge(msg.channel_id, limit).await? {
            Purge::Deleted(deleted) => deleted,
            Purge::Denied => {
                ctx.discord
                    .send(
                        msg.channel_id,
                        Reply::text("❌ I don’t have permission to delete messages here."),
                    )
                    .await?;
                return Ok(EventHandled::Yes);
            }
        };
        let count = purged_count(&deleted, msg.id);
        log_internal!(
            "{} purged {} message(s) in {}",
            msg.author_name,
            count,
            msg.channel_id
        );

        let Some(guild_id) = msg.guild_id else {
            return Ok(EventHandled::Yes);
        };
        if let Some(log_channel_id) = log_channel(ctx, guild_id).await {
            let line = purge_line(msg.author_id, msg.channel_id, count);
            ctx.discord.send(log_channel_id, Reply::Text(line)).await?;
        }
        Ok(EventHandled::Yes)
    }
}

fn purge_line(moderator: UserId, channel_id: ChannelId, count: usize) -> String {
    format!(
        "🧹 **Messages Purged**\n👤 Moderator: {}\n📍 Channel: {}\n🗑️ Amount: {}",
        moderator.mention(),
        channel_id.mention(),
        count
    )
}
