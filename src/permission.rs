//! Command authorization.  Permission math itself is Discord's (and serenity's); this only
//! decides whether what the invoker holds covers what a command requires.

use crate::{context::Context, event::CommandMessage};
use anyhow::Result;
use serenity::all::Permissions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    /// Carries the permissions the invoker is missing
    Denied(Permissions),
}

/// Administrator implies everything.
pub fn evaluate(held: Permissions, required: Permissions) -> Authorization {
    if held.contains(Permissions::ADMINISTRATOR) || held.contains(required) {
        Authorization::Allowed
    } else {
        Authorization::Denied(required - held)
    }
}

/// Check the author of a command message.  Outside a guild nothing is held.
pub async fn authorize(
    ctx: &Context<'_>,
    msg: &CommandMessage,
    required: Permissions,
) -> Result<Authorization> {
    if required.is_empty() {
        return Ok(Authorization::Allowed);
    }
    let held = match msg.guild_id {
        Some(guild_id) => {
            ctx.discord
                .permissions(guild_id, msg.channel_id, msg.author_id)
                .await?
        }
        None => Permissions::empty(),
    };
    Ok(evaluate(held, required))
}

pub fn denied_text(missing: Permissions) -> String {
    let names = missing
        .iter()
        .map(permission_name)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "❌ You are missing the {} permission(s) required to run this command.",
        names
    )
}

const PERMISSION_NAMES: &[(Permissions, &str)] = &[
    (Permissions::KICK_MEMBERS, "Kick Members"),
    (Permissions::MANAGE_ROLES, "Manage Roles"),
    (Permissions::MANAGE_MESSAGES, "Manage Messages"),
    (Permissions::ADMINISTRATOR, "Administrator"),
];

fn permission_name(permission: Permissions) -> &'static str {
    PERMISSION_NAMES
        .iter()
        .find(|(flag, _)| *flag == permission)
        .map(|(_, name)| *name)
        .unwrap_or("required")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn holds_required() {
        assert_eq!(
            evaluate(
                Permissions::KICK_MEMBERS | Permissions::SEND_MESSAGES,
                Permissions::KICK_MEMBERS
            ),
            Authorization::Allowed
        );
    }

    #[test]
    fn administrator_implies_everything() {
        assert_eq!(
            evaluate(Permissions::ADMINISTRATOR, Permissions::MANAGE_ROLES),
            Authorization::Allowed
        );
    }

    #[test]
    fn reports_only_missing() {
        assert_eq!(
            evaluate(
                Permissions::SEND_MESSAGES,
                Permissions::MANAGE_ROLES | Permissions::SEND_MESSAGES
            ),
            Authorization::Denied(Permissions::MANAGE_ROLES)
        );
    }

    #[test]
    fn denied_text_names_permissions() {
        assert_eq!(
            denied_text(Permissions::MANAGE_MESSAGES),
            "❌ You are missing the Manage Messages permission(s) required to run this command."
        );
    }

    #[tokio::test]
    async fn direct_messages_hold_nothing() {
        let fake = FakeDiscord::new();
        let cfg = config();
        let ctx = fake.ctx(&cfg);
        let mut msg = command_message(TARGET_GUILD, "?kick <@5>");
        msg.guild_id = None;
        assert_eq!(
            authorize(&ctx, &msg, Permissions::KICK_MEMBERS).await.unwrap(),
            Authorization::Denied(Permissions::KICK_MEMBERS)
        );
    }

    #[tokio::test]
    async fn looks_up_invoker_permissions() {
        let fake = FakeDiscord::new().with_permissions(Permissions::MANAGE_ROLES);
        let cfg = config();
        let ctx = fake.ctx(&cfg);
        let msg = command_message(TARGET_GUILD, "?role add <@5> Admin");
        assert_eq!(
            authorize(&ctx, &msg, Permissions::MANAGE_ROLES).await.unwrap(),
            Authorization::Allowed
        );
    }
}
