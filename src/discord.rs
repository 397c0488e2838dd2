//! Everything the bot asks of Discord, behind one trait.  The live implementation lives in
//! `serenity_api`; tests use `testing::FakeDiscord`.

use crate::{embed::Embed, event::SlashCommand};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serenity::all::{ChannelId, GuildId, MessageId, Permissions, RoleId, UserId};

/// What became of an outbound call the platform is allowed to refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The bot lacks the permission, or the target sits above it in the role hierarchy
    Denied,
    /// The user does not accept direct messages from server members
    DmUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Purge {
    Deleted(Vec<MessageId>),
    Denied,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Embed(Embed),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Human,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberView {
    pub id: UserId,
    pub display_name: String,
    pub roles: Vec<RoleId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleView {
    pub id: RoleId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuildOverview {
    pub id: GuildId,
    pub name: String,
    /// `None` when the owner is not in the member cache
    pub owner: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub icon_url: Option<String>,
    pub members: Vec<MemberKind>,
    pub channel_count: usize,
    pub role_count: usize,
}

/// Name and description of a slash command to register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlashSpec {
    pub name: &'static str,
    pub description: &'static str,
}

#[serenity::async_trait]
pub trait Discord: Sync + Send {
    async fn send(&self, channel_id: ChannelId, reply: Reply) -> Result<()>;
    async fn direct_message(&self, user_id: UserId, reply: Reply) -> Result<Outcome>;
    async fn respond(&self, command: &SlashCommand, reply: Reply) -> Result<()>;
    /// Overwrites the guild's slash commands with `commands`
    async fn register_commands(&self, guild_id: GuildId, commands: &[SlashSpec]) -> Result<()>;
    /// Ask the gateway for the full member list so counts are complete
    async fn request_members(&self, guild_id: GuildId);

    async fn kick(&self, guild_id: GuildId, user_id: UserId, reason: &str) -> Result<Outcome>;
    async fn add_role(&self, guild_id: GuildId, user_id: UserId, role_id: RoleId)
        -> Result<Outcome>;
    async fn remove_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<Outcome>;
    /// Delete up to `limit` of the most recent messages in a channel
    async fn purge(&self, channel_id: ChannelId, limit: usize) -> Result<Purge>;

    /// Text channel with the given name
    async fn find_text_channel(&self, guild_id: GuildId, name: &str) -> Option<ChannelId>;
    async fn guild(&self, guild_id: GuildId) -> Option<GuildOverview>;
    async fn member(&self, guild_id: GuildId, user_id: UserId) -> Option<MemberView>;
    async fn roles(&self, guild_id: GuildId) -> Vec<RoleView>;
    /// Effective permissions of a member in a channel
    async fn permissions(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Result<Permissions>;
}
