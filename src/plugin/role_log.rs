use crate::{config::Config, discord::Reply, event::*, helper::log_channel, plugin::*};
use anyhow::Result;
use serenity::all::{Mentionable, RoleId, UserId};

/// Mirrors role changes on members of the configured guild into the log channel
pub struct RoleLog;

#[serenity::async_trait]
impl Plugin for RoleLog {
    fn name(&self) -> &'static str {
        "role_log"
    }

    fn usage(&self, _cfg: &Config) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Event::MemberUpdate {
            guild_id,
            user_id,
            old_roles,
            new_roles,
        } = event
        else {
            return Ok(EventHandled::No);
        };
        if !ctx.cfg.is_target_guild(Some(*guild_id)) {
            return Ok(EventHandled::Yes);
        }
        // Without the old role set there is nothing to diff against
        let Some(old_roles) = old_roles else {
            return Ok(EventHandled::Yes);
        };

        let lines = role_changes(*user_id, old_roles, new_roles);
        if lines.is_empty() {
            return Ok(EventHandled::Yes);
        }
        let Some(log_channel_id) = log_channel(ctx, *guild_id).await else {
            return Ok(EventHandled::Yes);
        };
        for line in lines {
            ctx.discord.send(log_channel_id, Reply::Text(line)).await?;
        }
        Ok(EventHandled::Yes)
    }
}

/// One line per role gained, then one per role lost
fn role_changes(user_id: UserId, old: &[RoleId], new: &[RoleId]) -> Vec<String> {
    let added = new.iter().filter(|role| !old.contains(role)).map(|role| {
        format!(
            "➕ **Role Added** — {} → {}",
            user_id.mention(),
            role.mention()
        )
    });
    let removed = old.iter().filter(|role| !new.contains(role)).map(|role| {
        format!(
            "➖ **Role Removed** — {} → {}",
            user_id.mention(),
            role.mention()
        )
    });
    added.chain(removed).collect()
}
