use crate::{config::Config, discord::Reply, event::*, helper::log_channel, plugin::*};
use anyhow::Result;
use serenity::all::{ChannelId, Mentionable};

/// Mirrors deleted messages from the configured guild into the log channel
pub struct DeleteLog;

#[serenity::async_trait]
impl Plugin for DeleteLog {
    fn name(&self) -> &'static str {
        "delete_log"
    }

    fn usage(&self, _cfg: &Config) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Event::MessageDelete {
            guild_id,
            channel_id,
            message,
            ..
        } = event
        else {
            return Ok(EventHandled::No);
        };
        let Some(guild_id) = guild_id.filter(|id| ctx.cfg.is_target_guild(Some(*id))) else {
            return Ok(EventHandled::Yes);
        };
        // The author is only known for messages the cache saw
        let Some(message) = message.as_ref().filter(|message| !message.author_bot) else {
            return Ok(EventHandled::Yes);
        };
        let Some(log_channel_id) = log_channel(ctx, guild_id).await else {
            return Ok(EventHandled::Yes);
        };

        ctx.discord
            .send(log_channel_id, Reply::Text(deleted_line(message, *channel_id)))
            .await?;
        Ok(EventHandled::Yes)
    }
}

fn deleted_line(message: &DeletedMessage, channel_id: ChannelId) -> String {
    let content = if message.content.is_empty() {
        "No text content"
    } else {
        message.content.as_str()
    };
    format!(
        "🗑️ **Message Deleted**\n👤 Author: {}\n📍 Channel: {}\n💬 Content:\n```{}```",
        message.author_id.mention(),
        channel_id.mention(),
        content
    )
}

#[cfg(test)]
mod tests {
    use crate::{
        event::{DeletedMessage, Event},
        testing::*,
    };
    use pretty_assertions::assert_eq;
    use serenity::all::{GuildId, MessageId, UserId};

    fn deleted(guild_id: GuildId, content: &str, author_bot: bool) -> Event {
        Event::MessageDelete {
            guild_id: Some(guild_id),
            channel_id: CHANNEL,
            message_id: MessageId::new(900),
            message: Some(DeletedMessage {
                author_id: UserId::new(5),
                author_bot,
                content: content.to_owned(),
            }),
        }
    }

    #[tokio::test]
    async fn mirrors_content() {
        let fake = FakeDiscord::new().with_log_channel(TARGET_GUILD);
        let cfg = config();
        deleted(TARGET_GUILD, "hello there", false)
            .handle(&fake.ctx(&cfg))
            .await;
        assert_eq!(
            fake.texts_to(LOG_CHANNEL),
            vec!["🗑️ **Message Deleted**\n👤 Author: <@5>\n📍 Channel: <#300>\n💬 Content:\n```hello there```"]
        );
    }

    #[tokio::test]
    async fn empty_content_placeholder() {
        let fake = FakeDiscord::new().with_log_channel(TARGET_GUILD);
        let cfg = config();
        deleted(TARGET_GUILD, "", false)
            .handle(&fake.ctx(&cfg))
            .await;
        assert!(fake.texts_to(LOG_CHANNEL)[0].ends_with("```No text content```"));
    }

    #[tokio::test]
    async fn skips_bots_other_guilds_and_uncached() {
        let fake = FakeDiscord::new()
            .with_log_channel(TARGET_GUILD)
            .with_log_channel(OTHER_GUILD);
        let cfg = config();
        let ctx = fake.ctx(&cfg);

        deleted(TARGET_GUILD, "beep", true).handle(&ctx).await;
        deleted(OTHER_GUILD, "hello", false).handle(&ctx).await;
        Event::MessageDelete {
            guild_id: Some(TARGET_GUILD),
            channel_id: CHANNEL,
            message_id: MessageId::new(901),
            message: None,
        }
        .handle(&ctx)
        .await;

        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn no_log_channel() {
        let fake = FakeDiscord::new();
        let cfg = config();
        deleted(TARGET_GUILD, "hello", false)
            .handle(&fake.ctx(&cfg))
            .await;
        assert!(fake.calls().is_empty());
    }
}
