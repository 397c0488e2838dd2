use crate::{config::Config, event::*, log_event, logging::or_unknown, plugin::*};
use anyhow::Result;

/// Logs every inbound event
pub struct Debug;

#[serenity::async_trait]
impl Plugin for Debug {
    fn name(&self) -> &'static str {
        "debug"
    }

    fn usage(&self, _cfg: &Config) -> Option<String> {
        None
    }

    async fn handle(&self, _ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        match event {
            Event::Ready {
                user_name,
                guild_count,
            } => {
                log_event!("Connected to {} server(s) as {}", guild_count, user_name);
            }
            Event::Message(msg) => {
                log_event!(
                    "{}:{}:{} {}",
                    or_unknown(msg.guild_id, "<direct-message>"),
                    msg.channel_id,
                    msg.author_name,
                    msg.content,
                );
            }
            Event::SlashCommand(command) => {
                log_event!(
                    "{}:{}:{} used /{}",
                    or_unknown(command.guild_id, "<direct-message>"),
                    command.channel_id,
                    command.user_id,
                    command.name,
                );
            }
            Event::MemberJoin { guild_id, user_id } => {
                log_event!("{} joined {}", user_id, guild_id);
            }
            Event::MemberUpdate {
                guild_id, user_id, ..
            } => {
                log_event!("{} was updated in {}", user_id, guild_id);
            }
            Event::MessageDelete {
                guild_id,
                channel_id,
                message_id,
                message,
            } => {
                log_event!(
                    "{}:{} message {} deleted{}",
                    or_unknown(*guild_id, "<direct-message>"),
                    channel_id,
                    message_id,
                    if message.is_some() { "" } else { " (not cached)" },
                );
            }
        }

        Ok(EventHandled::No)
    }
}
