//! In-memory stand-in for Discord plus builders for synthetic events.

use crate::{
    config::Config,
    context::Context,
    discord::{Discord, GuildOverview, MemberView, Outcome, Purge, Reply, RoleView, SlashSpec},
    event::{CommandMessage, Event, SlashCommand},
};
use anyhow::Result;
use serenity::all::{
    ChannelId, GuildId, InteractionId, MessageId, Permissions, RoleId, UserId,
};
use std::{collections::HashMap, sync::Mutex};

pub const TARGET_GUILD: GuildId = GuildId::new(1000);
pub const OTHER_GUILD: GuildId = GuildId::new(2000);
pub const CHANNEL: ChannelId = ChannelId::new(300);
pub const LOG_CHANNEL: ChannelId = ChannelId::new(400);
pub const AUTHOR: UserId = UserId::new(500);
pub const COMMAND_ID: MessageId = MessageId::new(600);

/// Every outbound call the fake saw, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Send(ChannelId, Reply),
    DirectMessage(UserId, Reply),
    Respond(String, Reply),
    RegisterCommands(GuildId, Vec<&'static str>),
    RequestMembers(GuildId),
    Kick(GuildId, UserId, String),
    AddRole(GuildId, UserId, RoleId),
    RemoveRole(GuildId, UserId, RoleId),
    Purge(ChannelId, usize),
}

pub struct FakeDiscord {
    calls: Mutex<Vec<Call>>,
    members: Mutex<HashMap<UserId, MemberView>>,
    roles: Vec<RoleView>,
    text_channels: Vec<(GuildId, String, ChannelId)>,
    guild: Option<GuildOverview>,
    permissions: Permissions,
    dm_open: bool,
    moderation: Outcome,
    purge_denied: bool,
    /// Oldest first, like a channel
    history: Vec<MessageId>,
}

impl FakeDiscord {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            members: Mutex::new(HashMap::new()),
            roles: Vec::new(),
            text_channels: Vec::new(),
            guild: None,
            permissions: Permissions::empty(),
            dm_open: true,
            moderation: Outcome::Done,
            purge_denied: false,
            history: Vec::new(),
        }
    }

    pub fn with_member(self, member: MemberView) -> Self {
        self.members.lock().unwrap().insert(member.id, member);
        self
    }

    pub fn with_role(mut self, role: RoleView) -> Self {
        self.roles.push(role);
        self
    }

    pub fn with_log_channel(mut self, guild_id: GuildId) -> Self {
        self.text_channels
            .push((guild_id, "log".to_owned(), LOG_CHANNEL));
        self
    }

    pub fn with_text_channel(mut self, guild_id: GuildId, name: &str, id: ChannelId) -> Self {
        self.text_channels.push((guild_id, name.to_owned(), id));
        self
    }

    pub fn with_guild(mut self, guild: GuildOverview) -> Self {
        self.guild = Some(guild);
        self
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_history(mut self, history: Vec<MessageId>) -> Self {
        self.history = history;
        self
    }

    pub fn dms_closed(mut self) -> Self {
        self.dm_open = false;
        self
    }

    /// Make kicks and role changes fail as if the bot sat too low in the hierarchy
    pub fn bot_outranked(mut self) -> Self {
        self.moderation = Outcome::Denied;
        self.purge_denied = true;
        self
    }

    pub fn ctx<'a>(&'a self, cfg: &'a Config) -> Context<'a> {
        Context { cfg, discord: self }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Text sent to a channel, in order
    pub fn texts_to(&self, channel_id: ChannelId) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Send(id, Reply::Text(text)) if id == channel_id => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn member_roles(&self, user_id: UserId) -> Vec<RoleId> {
        self.members
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|member| member.roles.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[serenity::async_trait]
impl Discord for FakeDiscord {
    async fn send(&self, channel_id: ChannelId, reply: Reply) -> Result<()> {
        self.record(Call::Send(channel_id, reply));
        Ok(())
    }

    async fn direct_message(&self, user_id: UserId, reply: Reply) -> Result<Outcome> {
        self.record(Call::DirectMessage(user_id, reply));
        Ok(if self.dm_open {
            Outcome::Done
        } else {
            Outcome::DmUnavailable
        })
    }

    async fn respond(&self, command: &SlashCommand, reply: Reply) -> Result<()> {
        self.record(Call::Respond(command.name.clone(), reply));
        Ok(())
    }

    async fn register_commands(&self, guild_id: GuildId, commands: &[SlashSpec]) -> Result<()> {
        let names = commands.iter().map(|spec| spec.name).collect();
        self.record(Call::RegisterCommands(guild_id, names));
        Ok(())
    }

    async fn request_members(&self, guild_id: GuildId) {
        self.record(Call::RequestMembers(guild_id));
    }

    async fn kick(&self, guild_id: GuildId, user_id: UserId, reason: &str) -> Result<Outcome> {
        self.record(Call::Kick(guild_id, user_id, reason.to_owned()));
        if self.moderation == Outcome::Done {
            self.members.lock().unwrap().remove(&user_id);
        }
        Ok(self.moderation)
    }

    async fn add_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<Outcome> {
        self.record(Call::AddRole(guild_id, user_id, role_id));
        if self.moderation == Outcome::Done {
            if let Some(member) = self.members.lock().unwrap().get_mut(&user_id) {
                if !member.roles.contains(&role_id) {
                    member.roles.push(role_id);
                }
            }
        }
        Ok(self.moderation)
    }

    async fn remove_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<Outcome> {
        self.record(Call::RemoveRole(guild_id, user_id, role_id));
        if self.moderation == Outcome::Done {
            if let Some(member) = self.members.lock().unwrap().get_mut(&user_id) {
                member.roles.retain(|id| *id != role_id);
            }
        }
        Ok(self.moderation)
    }

    async fn purge(&self, channel_id: ChannelId, limit: usize) -> Result<Purge> {
        self.record(Call::Purge(channel_id, limit));
        if self.purge_denied {
            return Ok(Purge::Denied);
        }
        Ok(Purge::Deleted(
            self.history.iter().rev().take(limit).copied().collect(),
        ))
    }

    async fn find_text_channel(&self, guild_id: GuildId, name: &str) -> Option<ChannelId> {
        self.text_channels
            .iter()
            .find(|(guild, channel_name, _)| *guild == guild_id && channel_name == name)
            .map(|(_, _, id)| *id)
    }

    async fn guild(&self, guild_id: GuildId) -> Option<GuildOverview> {
        self.guild.clone().filter(|guild| guild.id == guild_id)
    }

    async fn member(&self, _guild_id: GuildId, user_id: UserId) -> Option<MemberView> {
        self.members.lock().unwrap().get(&user_id).cloned()
    }

    async fn roles(&self, _guild_id: GuildId) -> Vec<RoleView> {
        self.roles.clone()
    }

    async fn permissions(
        &self,
        _guild_id: GuildId,
        _channel_id: ChannelId,
        _user_id: UserId,
    ) -> Result<Permissions> {
        Ok(self.permissions)
    }
}

pub fn config() -> Config {
    config_with_ip(None)
}

pub fn config_with_ip(ip: Option<&str>) -> Config {
    let ip = ip.map(str::to_owned);
    Config::from_sources(Some("[general]\nguild_id = \"1000\"\n"), move |key| match key {
        "DISCORD_TOKEN" => Some("token".to_owned()),
        "Ip" => ip.clone(),
        _ => None,
    })
    .unwrap()
}

pub fn command_message(guild_id: GuildId, content: &str) -> CommandMessage {
    CommandMessage {
        id: COMMAND_ID,
        guild_id: Some(guild_id),
        channel_id: CHANNEL,
        author_id: AUTHOR,
        author_name: "moderator".to_owned(),
        author_avatar: "https://cdn.example/moderator.png".to_owned(),
        author_bot: false,
        content: content.to_owned(),
    }
}

pub fn message(guild_id: GuildId, content: &str) -> Event {
    Event::Message(command_message(guild_id, content))
}

pub fn slash(guild_id: GuildId, name: &str) -> Event {
    Event::SlashCommand(SlashCommand {
        id: InteractionId::new(700),
        token: "interaction-token".to_owned(),
        name: name.to_owned(),
        guild_id: Some(guild_id),
        channel_id: CHANNEL,
        user_id: AUTHOR,
    })
}

pub fn member(id: u64, roles: &[u64]) -> MemberView {
    MemberView {
        id: UserId::new(id),
        display_name: format!("user{}", id),
        roles: roles.iter().map(|id| RoleId::new(*id)).collect(),
    }
}

pub fn role(id: u64, name: &str) -> RoleView {
    RoleView {
        id: RoleId::new(id),
        name: name.to_owned(),
    }
}
