use crate::{
    config::Config,
    context::Context,
    event::{CommandMessage, DeletedMessage, Event, SlashCommand},
    recent::RecentMessages,
    serenity_api::SerenityApi,
};
use serenity::all::{
    ChannelId, GuildId, GuildMemberUpdateEvent, Interaction, Member, Message, MessageId,
    MessageUpdateEvent, Ready,
};
use tokio::sync::Mutex;

/// Discord event handler
pub struct Handler {
    cfg: Config,
    recent: Mutex<RecentMessages>,
}

impl Handler {
    pub fn new(cfg: Config) -> Self {
        let recent = RecentMessages::new(cfg.general.message_cache_size);
        Self {
            cfg,
            recent: Mutex::new(recent),
        }
    }

    async fn handle(&self, discord_ctx: &serenity::all::Context, event: Event) {
        let discord = SerenityApi { ctx: discord_ctx };
        let ctx = Context {
            cfg: &self.cfg,
            discord: &discord,
        };
        event.handle(&ctx).await;
    }
}

#[serenity::async_trait]
impl serenity::all::EventHandler for Handler {
    async fn ready(&self, discord_ctx: serenity::all::Context, ready: Ready) {
        let event = Event::Ready {
            user_name: ready.user.name.clone(),
            guild_count: ready.guilds.len(),
        };
        self.handle(&discord_ctx, event).await;
    }

    async fn message(&self, discord_ctx: serenity::all::Context, msg: Message) {
        if msg.guild_id.is_some() {
            self.recent.lock().await.insert(
                msg.id,
                DeletedMessage {
                    author_id: msg.author.id,
                    author_bot: msg.author.bot,
                    content: msg.content.clone(),
                },
            );
        }

        let event = Event::Message(CommandMessage {
            id: msg.id,
            guild_id: msg.guild_id,
            channel_id: msg.channel_id,
            author_id: msg.author.id,
            author_name: msg.author.name.clone(),
            author_avatar: msg.author.face(),
            author_bot: msg.author.bot,
            content: msg.content,
        });
        self.handle(&discord_ctx, event).await;
    }

    async fn message_update(
        &self,
        _discord_ctx: serenity::all::Context,
        _old_if_available: Option<Message>,
        _new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        // Edits without new text (embeds resolving, pins) leave the content alone
        if let Some(content) = event.content {
            self.recent.lock().await.update(event.id, content);
        }
    }

    async fn interaction_create(&self, discord_ctx: serenity::all::Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let event = Event::SlashCommand(SlashCommand {
            id: command.id,
            token: command.token,
            name: command.data.name,
            guild_id: command.guild_id,
            channel_id: command.channel_id,
            user_id: command.user.id,
        });
        self.handle(&discord_ctx, event).await;
    }

    async fn guild_member_addition(&self, discord_ctx: serenity::all::Context, new_member: Member) {
        let event = Event::MemberJoin {
            guild_id: new_member.guild_id,
            user_id: new_member.user.id,
        };
        self.handle(&discord_ctx, event).await;
    }

    async fn guild_member_update(
        &self,
        discord_ctx: serenity::all::Context,
        old_if_available: Option<Member>,
        new: Option<Member>,
        event: GuildMemberUpdateEvent,
    ) {
        let new_roles = match new {
            Some(new) => new.roles,
            None => event.roles,
        };
        let event = Event::MemberUpdate {
            guild_id: event.guild_id,
            user_id: event.user.id,
            old_roles: old_if_available.map(|old| old.roles),
            new_roles,
        };
        self.handle(&discord_ctx, event).await;
    }

    async fn message_delete(
        &self,
        discord_ctx: serenity::all::Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        guild_id: Option<GuildId>,
    ) {
        let message = self.recent.lock().await.take(deleted_message_id);
        let event = Event::MessageDelete {
            guild_id,
            channel_id,
            message_id: deleted_message_id,
            message,
        };
        self.handle(&discord_ctx, event).await;
    }
}
