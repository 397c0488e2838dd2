//! The live `Discord`: serenity's cache where it has the answer, the HTTP API otherwise.

use crate::{
    discord::{
        Discord, GuildOverview, MemberKind, MemberView, Outcome, Purge, Reply, RoleView, SlashSpec,
    },
    event::SlashCommand,
    helper::bulk_deletable,
};
use anyhow::{anyhow, Result};
use serenity::all::{
    ChannelId, ChannelType, ChunkGuildFilter, CreateCommand, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage, GetMessages,
    GuildId, HttpError, Member, MessageId, ModelError, Permissions, RoleId, UserId,
};

/// Most messages a single fetch or bulk delete may cover
const PAGE_SIZE: usize = 100;

pub struct SerenityApi<'a> {
    pub ctx: &'a serenity::all::Context,
}

/// The platform refused: missing permission, role hierarchy, or a closed DM
fn is_forbidden(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            response.status_code.as_u16() == 403
        }
        serenity::Error::Model(ModelError::Hierarchy | ModelError::InvalidPermissions { .. }) => {
            true
        }
        _ => false,
    }
}

fn outcome(result: serenity::Result<()>, refused: Outcome) -> Result<Outcome> {
    match result {
        Ok(()) => Ok(Outcome::Done),
        Err(err) if is_forbidden(&err) => Ok(refused),
        Err(err) => Err(err.into()),
    }
}

fn create_message(reply: Reply) -> CreateMessage {
    match reply {
        Reply::Text(text) => CreateMessage::new().content(text),
        Reply::Embed(embed) => CreateMessage::new().embed(CreateEmbed::from(&embed)),
    }
}

fn member_view(member: &Member) -> MemberView {
    MemberView {
        id: member.user.id,
        display_name: member.display_name().to_owned(),
        roles: member.roles.clone(),
    }
}

impl SerenityApi<'_> {
    /// Delete already fetched messages, in bulk where Discord allows it.  Stops at the first
    /// refusal, returning what was deleted up to then.
    async fn delete_all(&self, channel_id: ChannelId, ids: Vec<MessageId>) -> Result<Purge> {
        let now = chrono::Utc::now().timestamp();
        let (bulk, single): (Vec<_>, Vec<_>) =
            ids.into_iter().partition(|id| bulk_deletable(*id, now));

        let mut batches: Vec<Vec<MessageId>> =
            bulk.chunks(PAGE_SIZE).map(<[MessageId]>::to_vec).collect();
        batches.extend(single.into_iter().map(|id| vec![id]));

        let mut deleted = Vec::new();
        for batch in batches {
            let result = match batch.as_slice() {
                [id] => channel_id.delete_message(&self.ctx.http, *id).await,
                ids => {
                    let body = serde_json::json!({ "messages": ids });
                    self.ctx.http.delete_messages(channel_id, &body, None).await
                }
            };
            match result {
                Ok(()) => deleted.extend(batch),
                Err(err) if is_forbidden(&err) && deleted.is_empty() => return Ok(Purge::Denied),
                Err(err) if is_forbidden(&err) => break,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(Purge::Deleted(deleted))
    }
}

#[serenity::async_trait]
impl Discord for SerenityApi<'_> {
    async fn send(&self, channel_id: ChannelId, reply: Reply) -> Result<()> {
        channel_id
            .send_message(self.ctx, create_message(reply))
            .await?;
        Ok(())
    }

    async fn direct_message(&self, user_id: UserId, reply: Reply) -> Result<Outcome> {
        let result = user_id
            .direct_message(self.ctx, create_message(reply))
            .await
            .map(|_| ());
        outcome(result, Outcome::DmUnavailable)
    }

    async fn respond(&self, command: &SlashCommand, reply: Reply) -> Result<()> {
        let message = match reply {
            Reply::Text(text) => CreateInteractionResponseMessage::new().content(text),
            Reply::Embed(embed) => {
                CreateInteractionResponseMessage::new().embed(CreateEmbed::from(&embed))
            }
        };
        self.ctx
            .http
            .create_interaction_response(
                command.id,
                &command.token,
                &CreateInteractionResponse::Message(message),
                Vec::new(),
            )
            .await?;
        Ok(())
    }

    async fn register_commands(&self, guild_id: GuildId, commands: &[SlashSpec]) -> Result<()> {
        let commands = commands
            .iter()
            .map(|spec| CreateCommand::new(spec.name).description(spec.description))
            .collect();
        guild_id.set_commands(&self.ctx.http, commands).await?;
        Ok(())
    }

    async fn request_members(&self, guild_id: GuildId) {
        self.ctx
            .shard
            .chunk_guild(guild_id, None, false, ChunkGuildFilter::None, None);
    }

    async fn kick(&self, guild_id: GuildId, user_id: UserId, reason: &str) -> Result<Outcome> {
        let result = guild_id
            .kick_with_reason(&self.ctx.http, user_id, reason)
            .await;
        outcome(result, Outcome::Denied)
    }

    async fn add_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<Outcome> {
        let result = self
            .ctx
            .http
            .add_member_role(guild_id, user_id, role_id, None)
            .await;
        outcome(result, Outcome::Denied)
    }

    async fn remove_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<Outcome> {
        let result = self
            .ctx
            .http
            .remove_member_role(guild_id, user_id, role_id, None)
            .await;
        outcome(result, Outcome::Denied)
    }

    async fn purge(&self, channel_id: ChannelId, limit: usize) -> Result<Purge> {
        // Newest first, a page at a time
        let mut ids = Vec::with_capacity(limit);
        let mut before: Option<MessageId> = None;
        while ids.len() < limit {
            let page = (limit - ids.len()).min(PAGE_SIZE);
            let mut request = GetMessages::new().limit(page as u8);
            if let Some(before) = before {
                request = request.before(before);
            }
            let messages = match channel_id.messages(self.ctx, request).await {
                Ok(messages) => messages,
                Err(err) if is_forbidden(&err) => return Ok(Purge::Denied),
                Err(err) => return Err(err.into()),
            };

            let fetched = messages.len();
            before = messages.last().map(|message| message.id);
            ids.extend(messages.into_iter().map(|message| message.id));
            if fetched < page {
                break;
            }
        }

        if ids.is_empty() {
            return Ok(Purge::Deleted(ids));
        }
        self.delete_all(channel_id, ids).await
    }

    async fn find_text_channel(&self, guild_id: GuildId, name: &str) -> Option<ChannelId> {
        let cached = self.ctx.cache.guild(guild_id).map(|guild| {
            guild
                .channels
                .values()
                .find(|channel| channel.kind == ChannelType::Text && channel.name == name)
                .map(|channel| channel.id)
        });
        if let Some(cached) = cached {
            return cached;
        }

        let channels = guild_id.channels(&self.ctx.http).await.ok()?;
        channels
            .into_values()
            .find(|channel| channel.kind == ChannelType::Text && channel.name == name)
            .map(|channel| channel.id)
    }

    async fn guild(&self, guild_id: GuildId) -> Option<GuildOverview> {
        let guild = self.ctx.cache.guild(guild_id)?;
        let created_at = chrono::DateTime::from_timestamp(guild_id.created_at().unix_timestamp(), 0)
            .unwrap_or_default();
        Some(GuildOverview {
            id: guild.id,
            name: guild.name.clone(),
            // Only named when the owner is in the member cache
            owner: guild
                .members
                .contains_key(&guild.owner_id)
                .then_some(guild.owner_id),
            created_at,
            icon_url: guild.icon_url(),
            members: guild
                .members
                .values()
                .map(|member| {
                    if member.user.bot {
                        MemberKind::Bot
                    } else {
                        MemberKind::Human
                    }
                })
                .collect(),
            channel_count: guild.channels.len(),
            role_count: guild.roles.len(),
        })
    }

    async fn member(&self, guild_id: GuildId, user_id: UserId) -> Option<MemberView> {
        let cached = self
            .ctx
            .cache
            .guild(guild_id)
            .and_then(|guild| guild.members.get(&user_id).map(member_view));
        if cached.is_some() {
            return cached;
        }

        let member = guild_id.member(self.ctx, user_id).await.ok()?;
        Some(member_view(&member))
    }

    async fn roles(&self, guild_id: GuildId) -> Vec<RoleView> {
        let cached: Option<Vec<RoleView>> = self.ctx.cache.guild(guild_id).map(|guild| {
            guild
                .roles
                .values()
                .map(|role| RoleView {
                    id: role.id,
                    name: role.name.clone(),
                })
                .collect()
        });
        if let Some(cached) = cached {
            return cached;
        }

        match guild_id.roles(&self.ctx.http).await {
            Ok(roles) => roles
                .into_values()
                .map(|role| RoleView {
                    id: role.id,
                    name: role.name,
                })
                .collect(),
            Err(err) => {
                tracing::warn!("Could not fetch roles of {}: {}", guild_id, err);
                Vec::new()
            }
        }
    }

    async fn permissions(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Result<Permissions> {
        let member = guild_id.member(self.ctx, user_id).await?;
        let guild = self
            .ctx
            .cache
            .guild(guild_id)
            .ok_or(anyhow!("Guild {} is not cached", guild_id))?;
        // Threads are not in the channel map; fall back to guild-wide permissions there
        let permissions = match guild.channels.get(&channel_id) {
            Some(channel) => guild.user_permissions_in(channel, &member),
            #[allow(deprecated)]
            None => guild.member_permissions(&member),
        };
        Ok(permissions)
    }
}
