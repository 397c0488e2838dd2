//! The Serenity crate we're using for the Discord API is designed around callbacks to handle
//! events.  However, this does not mesh well with our plugin framework here.  To resolve this,
//! `handler` translates the callbacks into this distinct Event enum, carrying only the data the
//! plugins look at.

use crate::{
    args::Args,
    context::Context,
    discord::Reply,
    permission::{self, Authorization},
    plugin::Plugin,
};
use anyhow::Result;
use serenity::all::{ChannelId, GuildId, InteractionId, MessageId, RoleId, UserId};

/// A Discord event
#[derive(Debug, Clone)]
pub enum Event {
    Ready {
        user_name: String,
        guild_count: usize,
    },
    Message(CommandMessage),
    SlashCommand(SlashCommand),
    MemberJoin {
        guild_id: GuildId,
        user_id: UserId,
    },
    MemberUpdate {
        guild_id: GuildId,
        user_id: UserId,
        /// `None` when the member was not cached before the update
        old_roles: Option<Vec<RoleId>>,
        new_roles: Vec<RoleId>,
    },
    MessageDelete {
        guild_id: Option<GuildId>,
        channel_id: ChannelId,
        message_id: MessageId,
        /// `None` when the message was never cached
        message: Option<DeletedMessage>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMessage {
    pub id: MessageId,
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub author_id: UserId,
    pub author_name: String,
    pub author_avatar: String,
    pub author_bot: bool,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashCommand {
    pub id: InteractionId,
    pub token: String,
    pub name: String,
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedMessage {
    pub author_id: UserId,
    pub author_bot: bool,
    pub content: String,
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Ready { .. } => "ready",
            Event::Message(_) => "message",
            Event::SlashCommand(_) => "slash_command",
            Event::MemberJoin { .. } => "member_join",
            Event::MemberUpdate { .. } => "member_update",
            Event::MessageDelete { .. } => "message_delete",
        }
    }

    // When an event occurs, iterate over all the plugins to see if any can/should handle it.
    pub async fn handle(&self, ctx: &Context<'_>) {
        for plugin in crate::plugin::plugins() {
            match self.dispatch(ctx, plugin.as_ref()).await {
                Ok(EventHandled::Yes) => return,
                Ok(EventHandled::No) => continue,
                Err(err) => {
                    tracing::error!(plugin = plugin.name(), event = self.kind(), "{:#}", err)
                }
            }
        }
    }

    /// Offer the event to one plugin.  Commands are scoped and authorized here, before the plugin
    /// sees them.
    async fn dispatch(&self, ctx: &Context<'_>, plugin: &dyn Plugin) -> Result<EventHandled> {
        if let Some((msg, _)) = self.is_bot_cmd(ctx, plugin.name()) {
            if plugin.target_guild_only() && !ctx.cfg.is_target_guild(msg.guild_id) {
                return Ok(EventHandled::Yes);
            }
        }

        let required = plugin.permissions();
        if !required.is_empty() {
            if let Some((msg, _)) = self.is_bot_cmd(ctx, plugin.name()) {
                if let Authorization::Denied(missing) =
                    permission::authorize(ctx, msg, required).await?
                {
                    ctx.discord
                        .send(msg.channel_id, Reply::Text(permission::denied_text(missing)))
                        .await?;
                    return Ok(EventHandled::Yes);
                }
            }
        }

        plugin.handle(ctx, self).await
    }

    // Check if a message should be interpreted as a bot command, e.g. `?cmd foo bar baz`.
    //
    // Any of the configured prefixes is accepted.  Returns the message and everything after the
    // command name.
    pub fn is_bot_cmd<'e>(
        &'e self,
        ctx: &Context<'_>,
        cmd: &str,
    ) -> Option<(&'e CommandMessage, Args<'e>)> {
        let Event::Message(msg) = self else {
            return None;
        };

        let content = msg.content.trim_start();
        ctx.cfg
            .general
            .command_prefixes
            .iter()
            .filter_map(|prefix| content.strip_prefix(prefix.as_str()))
            .find_map(|rest| {
                let name = rest.split_whitespace().next()?;
                (name == cmd && rest.starts_with(name))
                    .then(|| (msg, Args::new(&rest[name.len()..])))
            })
    }

    /// The slash command with this name, if that is what this event is
    pub fn is_slash_cmd(&self, cmd: &str) -> Option<&SlashCommand> {
        match self {
            Event::SlashCommand(command) if command.name == cmd => Some(command),
            _ => None,
        }
    }
}

pub enum EventHandled {
    Yes,
    No,
}
