use crate::{
    config::Config,
    discord::{Outcome, Reply},
    event::*,
    log_internal,
    plugin::*,
};
use anyhow::Result;
use serenity::all::{Mentionable, Permissions};

const SYNOPSIS: &str = "<add|remove> <member> <role>";
const HIERARCHY_ERROR: &str = "❌ I can’t manage that role (role hierarchy issue).";

/// Adds or removes a role on a member of the configured guild
pub struct Roles;

enum RoleCmd {
    Add,
    Remove,
}

#[serenity::async_trait]
impl Plugin for Roles {
    fn name(&self) -> &'static str {
        "role"
    }

    fn usage(&self, cfg: &Config) -> Option<String> {
        Some(usage_line(
            cfg,
            self.name(),
            SYNOPSIS,
            "give or take a role (Manage Roles)",
        ))
    }

    fn permissions(&self) -> Permissions {
        Permissions::MANAGE_ROLES
    }

    fn target_guild_only(&self) -> bool {
        true
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        let Some((msg, args)) = event.is_bot_cmd(ctx, self.name()) else {
            return Ok(EventHandled::No);
        };
        let Some(guild_id) = msg.guild_id.filter(|id| ctx.cfg.is_target_guild(Some(*id))) else {
            return Ok(EventHandled::Yes);
        };

        let resolved = match args.require(0, "action") {
            Ok(action) => match args.member(ctx, guild_id, 1, "member").await {
                Ok(member) => args
                    .role(ctx, guild_id, 2, "role")
                    .await
                    .map(|role| (action, member, role)),
                Err(err) => Err(err),
            },
            Err(err) => Err(err),
        };
        let (action, member, role) = match resolved {
            Ok(resolved) => resolved,
            Err(err) => {
                let usage = command_usage(ctx.cfg, self.name(), SYNOPSIS);
                ctx.discord
                    .send(msg.channel_id, Reply::Text(err.reply(&usage)))
                    .await?;
                return Ok(EventHandled::Yes);
            }
        };

        let cmd = match action.to_lowercase().as_str() {
            "add" => RoleCmd::Add,
            "remove" => RoleCmd::Remove,
            _ => {
                let prefix = ctx.cfg.display_prefix();
                let hint = format!(
                    "❌ Usage: `{}role add @user @role` or `{}role remove @user @role`",
                    prefix, prefix
                );
                ctx.discord.send(msg.channel_id, Reply::Text(hint)).await?;
                return Ok(EventHandled::Yes);
            }
        };

        let (outcome, done) = match cmd {
            RoleCmd::Add => (
                ctx.discord.add_role(guild_id, member.id, role.id).await?,
                format!("🏷️ Added {} to {}", role.id.mention(), member.id.mention()),
            ),
            RoleCmd::Remove => (
                ctx.discord.remove_role(guild_id, member.id, role.id).await?,
                format!(
                    "🏷️ Removed {} from {}",
                    role.id.mention(),
                    member.id.mention()
                ),
            ),
        };

        let reply = match outcome {
            Outcome::Done => {
                log_internal!(
                    "{} used role {} {} on {}",
                    msg.author_name,
                    action,
                    role.name,
                    member.display_name
                );
                done
            }
            Outcome::Denied | Outcome::DmUnavailable => HIERARCHY_ERROR.to_owned(),
        };
        ctx.discord.send(msg.channel_id, Reply::Text(reply)).await?;
        Ok(EventHandled::Yes)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::*;
    use pretty_assertions::assert_eq;
    use serenity::all::{Permissions, RoleId, UserId};

    fn fake() -> FakeDiscord {
        FakeDiscord::new()
            .with_member(member(5, &[1]))
            .with_role(role(1, "Admin"))
            .with_role(role(2, "Builder"))
    }

    #[tokio::test]
    async fn adds_role() {
        let fake = fake().with_permissions(Permissions::MANAGE_ROLES);
        let cfg = config();
        message(TARGET_GUILD, "?role add <@5> <@&2>")
            .handle(&fake.ctx(&cfg))
            .await;

        assert_eq!(
            fake.calls()[0],
            Call::AddRole(TARGET_GUILD, UserId::new(5), RoleId::new(2))
        );
        assert_eq!(fake.texts_to(CHANNEL), vec!["🏷️ Added <@&2> to <@5>"]);
        assert_eq!(
            fake.member_roles(UserId::new(5)),
            vec![RoleId::new(1), RoleId::new(2)]
        );
    }

    #[tokio::test]
    async fn removes_role_by_name_with_any_case_action() {
        let fake = fake().with_permissions(Permissions::MANAGE_ROLES);
        let cfg = config();
        message(TARGET_GUILD, "!role REMOVE 5 Admin")
            .handle(&fake.ctx(&cfg))
            .await;

        assert_eq!(fake.texts_to(CHANNEL), vec!["🏷️ Removed <@&1> from <@5>"]);
        assert!(fake.member_roles(UserId::new(5)).is_empty());
    }

    #[tokio::test]
    async fn unknown_action_gets_usage_hint() {
        let fake = fake().with_permissions(Permissions::MANAGE_ROLES);
        let cfg = config();
        message(TARGET_GUILD, "?role toggle <@5> <@&2>")
            .handle(&fake.ctx(&cfg))
            .await;

        assert_eq!(
            fake.calls(),
            vec![Call::Send(
                CHANNEL,
                crate::discord::Reply::text(
                    "❌ Usage: `?role add @user @role` or `?role remove @user @role`"
                )
            )]
        );
    }

    #[tokio::test]
    async fn hierarchy_violation() {
        let fake = fake()
            .with_permissions(Permissions::MANAGE_ROLES)
            .bot_outranked();
        let cfg = config();
        message(TARGET_GUILD, "?role add <@5> <@&2>")
            .handle(&fake.ctx(&cfg))
            .await;

        assert_eq!(
            fake.texts_to(CHANNEL),
            vec!["❌ I can’t manage that role (role hierarchy issue)."]
        );
        assert_eq!(fake.member_roles(UserId::new(5)), vec![RoleId::new(1)]);
    }

    #[tokio::test]
    async fn other_guilds_are_ignored() {
        for held in [Permissions::MANAGE_ROLES, Permissions::SEND_MESSAGES] {
            let fake = fake().with_permissions(held);
            let cfg = config();
            message(OTHER_GUILD, "?role add <@5> <@&2>")
                .handle(&fake.ctx(&cfg))
                .await;
            message(OTHER_GUILD, "?role remove <@5> <@&1>")
                .handle(&fake.ctx(&cfg))
                .await;

            assert!(fake.calls().is_empty(), "{held:?} got {:?}", fake.calls());
            assert_eq!(fake.member_roles(UserId::new(5)), vec![RoleId::new(1)]);
        }
    }

    #[tokio::test]
    async fn direct_messages_are_ignored() {
        let fake = fake();
        let cfg = config();
        let mut msg = command_message(TARGET_GUILD, "?role add <@5> <@&2>");
        msg.guild_id = None;
        crate::event::Event::Message(msg)
            .handle(&fake.ctx(&cfg))
            .await;
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_manage_roles_changes_nothing() {
        let fake = fake().with_permissions(Permissions::SEND_MESSAGES);
        let cfg = config();
        message(TARGET_GUILD, "?role remove <@5> <@&1>")
            .handle(&fake.ctx(&cfg))
            .await;

        assert_eq!(
            fake.texts_to(CHANNEL),
            vec!["❌ You are missing the Manage Roles permission(s) required to run this command."]
        );
        assert_eq!(fake.calls().len(), 1);
        assert_eq!(fake.member_roles(UserId::new(5)), vec![RoleId::new(1)]);
    }

    #[tokio::test]
    async fn unknown_role_gets_usage() {
        let fake = fake().with_permissions(Permissions::MANAGE_ROLES);
        let cfg = config();
        message(TARGET_GUILD, "?role add <@5> Moderator")
            .handle(&fake.ctx(&cfg))
            .await;

        assert_eq!(
            fake.texts_to(CHANNEL),
            vec!["❌ Role `Moderator` not found.\nUsage: `?role <add|remove> <member> <role>`"]
        );
    }
}
