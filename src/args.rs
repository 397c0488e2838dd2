//! Command arguments: the text after the command name, split on whitespace and resolved into
//! members, roles and integers on demand.

use crate::{
    context::Context,
    discord::{MemberView, RoleView},
    helper::{parse_role_mention, parse_user_mention},
};
use serenity::all::GuildId;
use std::num::{IntErrorKind, ParseIntError};

/// Why an argument could not be turned into what the command needs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgError {
    #[error("Missing argument `{0}`.")]
    Missing(&'static str),
    #[error("`{0}` is not a whole number.")]
    NotAnInteger(String),
    #[error("`{0}` is out of range.")]
    OutOfRange(String),
    #[error("Member `{0}` not found.")]
    MemberNotFound(String),
    #[error("Role `{0}` not found.")]
    RoleNotFound(String),
    #[error("This command only works in servers.")]
    NotInGuild,
}

impl ArgError {
    /// Rejection shown to the invoker
    pub fn reply(&self, usage: &str) -> String {
        format!("❌ {}\nUsage: `{}`", self, usage)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    raw: &'a str,
}

impl<'a> Args<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.raw.split_whitespace().nth(index)
    }

    pub fn require(&self, index: usize, name: &'static str) -> Result<&'a str, ArgError> {
        self.get(index).ok_or(ArgError::Missing(name))
    }

    /// Everything after the first `skip` arguments, verbatim apart from surrounding whitespace.
    pub fn rest(&self, skip: usize) -> Option<&'a str> {
        let mut rest = self.raw.trim_start();
        for _ in 0..skip {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            rest = rest[end..].trim_start();
        }
        let rest = rest.trim_end();
        (!rest.is_empty()).then_some(rest)
    }

    pub fn integer(&self, index: usize, name: &'static str) -> Result<i64, ArgError> {
        let raw = self.require(index, name)?;
        raw.parse().map_err(|err: ParseIntError| match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                ArgError::OutOfRange(raw.to_owned())
            }
            _ => ArgError::NotAnInteger(raw.to_owned()),
        })
    }

    /// A member of the guild, given as a mention or a raw user id
    pub async fn member(
        &self,
        ctx: &Context<'_>,
        guild_id: GuildId,
        index: usize,
        name: &'static str,
    ) -> Result<MemberView, ArgError> {
        let raw = self.require(index, name)?;
        let not_found = || ArgError::MemberNotFound(raw.to_owned());
        let user_id = parse_user_mention(raw).ok_or_else(not_found)?;
        ctx.discord
            .member(guild_id, user_id)
            .await
            .ok_or_else(not_found)
    }

    /// A guild role, given as a mention, a raw role id, or the role's name
    pub async fn role(
        &self,
        ctx: &Context<'_>,
        guild_id: GuildId,
        index: usize,
        name: &'static str,
    ) -> Result<RoleView, ArgError> {
        let raw = self.require(index, name)?;
        let roles = ctx.discord.roles(guild_id).await;
        find_role(roles, raw).ok_or(ArgError::RoleNotFound(raw.to_owned()))
    }
}

fn find_role(roles: Vec<RoleView>, raw: &str) -> Option<RoleView> {
    if let Some(role_id) = parse_role_mention(raw) {
        if let Some(role) = roles.iter().find(|role| role.id == role_id) {
            return Some(role.clone());
        }
    }

    // Exact name first, then ignoring case
    if let Some(role) = roles.iter().find(|role| role.name == raw) {
        return Some(role.clone());
    }
    roles
        .into_iter()
        .find(|role| role.name.eq_ignore_ascii_case(raw))
}
