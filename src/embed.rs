//! Display payloads.  Plugins build plain `Embed` values; only the Discord seam turns them into
//! serenity builders, which keeps formatting testable without a connection.

use crate::discord::{GuildOverview, MemberKind};
use chrono::{DateTime, Utc};
use serenity::all::{Colour, CreateEmbed, CreateEmbedFooter, Mentionable, Timestamp};

pub const RED: u32 = 0xe74c3c;
pub const GREEN: u32 = 0x2ecc71;
pub const BLURPLE: u32 = 0x5865f2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Embed {
    pub title: String,
    pub description: Option<String>,
    pub colour: u32,
    pub fields: Vec<EmbedField>,
    pub footer: Option<Footer>,
    pub thumbnail: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Footer {
    pub text: String,
    pub icon_url: Option<String>,
}

impl Embed {
    pub fn new(title: impl Into<String>, colour: u32) -> Self {
        Self {
            title: title.into(),
            colour,
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl ToString, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.to_string(),
            inline,
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>, icon_url: Option<String>) -> Self {
        self.footer = Some(Footer {
            text: text.into(),
            icon_url,
        });
        self
    }

    #[cfg(test)]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}

impl From<&Embed> for CreateEmbed {
    fn from(embed: &Embed) -> Self {
        let mut out = CreateEmbed::new()
            .title(&embed.title)
            .colour(Colour::new(embed.colour));
        if let Some(description) = &embed.description {
            out = out.description(description);
        }
        for field in &embed.fields {
            out = out.field(&field.name, &field.value, field.inline);
        }
        if let Some(footer) = &embed.footer {
            let mut create_footer = CreateEmbedFooter::new(&footer.text);
            if let Some(icon_url) = &footer.icon_url {
                create_footer = create_footer.icon_url(icon_url);
            }
            out = out.footer(create_footer);
        }
        if let Some(thumbnail) = &embed.thumbnail {
            out = out.thumbnail(thumbnail);
        }
        if let Some(timestamp) = embed
            .timestamp
            .and_then(|ts| Timestamp::from_unix_timestamp(ts.timestamp()).ok())
        {
            out = out.timestamp(timestamp);
        }
        out
    }
}

/// The server rules, sent on join and by `send`
pub fn rules() -> Embed {
    Embed::new("📜 Welcome to the Server!", RED)
        .description("Please read the rules carefully ❤️")
        .field(
            "💬 Discord Rules",
            "🤝 Be respectful to everyone\n\
             🚫 No spamming or excessive tagging\n\
             🔞 No NSFW or disturbing content\n\
             📢 No advertising without staff permission\n\
             ⚠️ No illegal activity\n\
             🔐 Do not share personal information\n\
             🧭 Use the correct channels\n\
             👮 Staff decisions are final",
            false,
        )
        .footer("⚠️ Breaking rules may result in punishment", None)
}

pub fn server_ip(address: &str) -> Embed {
    Embed::new("🌍 Minecraft Server IP", GREEN)
        .description(format!("```{}```", address))
        .footer("Copy & paste into Minecraft", None)
}

/// Human and bot head counts of a guild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberTally {
    pub humans: usize,
    pub bots: usize,
}

impl MemberTally {
    pub fn count(members: &[MemberKind]) -> Self {
        let bots = members
            .iter()
            .filter(|kind| **kind == MemberKind::Bot)
            .count();
        Self {
            humans: members.len() - bots,
            bots,
        }
    }

    pub fn total(&self) -> usize {
        self.humans + self.bots
    }
}

pub struct Requester<'a> {
    pub name: &'a str,
    pub avatar_url: &'a str,
}

pub fn server_info(guild: &GuildOverview, requester: &Requester, now: DateTime<Utc>) -> Embed {
    let tally = MemberTally::count(&guild.members);
    let owner = guild
        .owner
        .map(|owner| owner.mention().to_string())
        .unwrap_or("Unknown".to_owned());

    let mut embed = Embed::new(format!("ℹ️ Server Info — {}", guild.name), BLURPLE)
        .field("🆔 Server ID", guild.id, true)
        .field("👑 Owner", owner, true)
        .field("📆 Created On", guild.created_at.format("%Y-%m-%d"), true)
        .field("👥 Members", tally.total(), true)
        .field("🧑 Humans", tally.humans, true)
        .field("🤖 Bots", tally.bots, true)
        .field("💬 Channels", guild.channel_count, true)
        .field("🏷️ Roles", guild.role_count, true)
        .footer(
            format!("Requested by {}", requester.name),
            Some(requester.avatar_url.to_owned()),
        );
    embed.thumbnail = guild.icon_url.clone();
    embed.timestamp = Some(now);
    embed
}
