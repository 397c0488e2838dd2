//! Miscellaneous convenience methods

use crate::context::Context;
use serenity::all::{ChannelId, GuildId, MessageId, RoleId, UserId};

/// Discord refuses to bulk delete messages older than this
pub const BULK_DELETE_MAX_AGE_SECS: i64 = 14 * 24 * 60 * 60;

/// Parse a user from `<@id>`, `<@!id>`, or a raw id.
pub fn parse_user_mention(raw: &str) -> Option<UserId> {
    let raw = raw.trim();
    let numeric = match raw.strip_prefix("<@").and_then(|s| s.strip_suffix('>')) {
        Some(inner) => inner.strip_prefix('!').unwrap_or(inner),
        None => raw,
    };
    parse_snowflake(numeric).map(UserId::new)
}

/// Parse a role from `<@&id>` or a raw id.
pub fn parse_role_mention(raw: &str) -> Option<RoleId> {
    let raw = raw.trim();
    let numeric = raw
        .strip_prefix("<@&")
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(raw);
    parse_snowflake(numeric).map(RoleId::new)
}

// Ids are never zero, and serenity panics constructing one that is.
fn parse_snowflake(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().filter(|id| *id != 0)
}

/// The guild's log channel, if it has one.
pub async fn log_channel(ctx: &Context<'_>, guild_id: GuildId) -> Option<ChannelId> {
    ctx.discord
        .find_text_channel(guild_id, &ctx.cfg.general.log_channel)
        .await
}

/// Whether Discord still allows deleting this message in bulk.
pub fn bulk_deletable(message_id: MessageId, now_unix: i64) -> bool {
    let created = message_id.created_at().unix_timestamp();
    now_unix - created < BULK_DELETE_MAX_AGE_SECS
}

/// How many messages a purge removed, not counting the command that asked for it.
pub fn purged_count(deleted: &[MessageId], command: MessageId) -> usize {
    deleted.iter().filter(|id| **id != command).count()
}
