use crate::{
    config::Config,
    discord::{Reply, SlashSpec},
    embed,
    event::*,
    plugin::*,
};
use anyhow::Result;

/// Posts the rules, as a text command or as the `/send` slash command
pub struct SendRules;

#[serenity::async_trait]
impl Plugin for SendRules {
    fn name(&self) -> &'static str {
        "send"
    }

    fn usage(&self, cfg: &Config) -> Option<String> {
        Some(usage_line(cfg, self.name(), "", "post the server rules"))
    }

    fn slash(&self) -> Option<SlashSpec> {
        Some(SlashSpec {
            name: "send",
            description: "Send rules",
        })
    }

    async fn handle(&self, ctx: &Context<'_>, event: &Event) -> Result<EventHandled> {
        if let Some(command) = event.is_slash_cmd(self.name()) {
            ctx.discord
                .respond(command, Reply::Embed(embed::rules()))
                .await?;
            return Ok(EventHandled::Yes);
        }

        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()) else {
            return Ok(EventHandled::No);
        };

        ctx.discord
            .send(msg.channel_id, Reply::Embed(embed::rules()))
            .await?;
        Ok(EventHandled::Yes)
    }
}

#[cfg(test)]
mod tests {
    use crate::{discord::Reply, embed, testing::*};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn text_command_posts_rules_in_channel() {
        let fake = FakeDiscord::new();
        let cfg = config();
        message(TARGET_GUILD, "!send").handle(&fake.ctx(&cfg)).await;
        assert_eq!(
            fake.calls(),
            vec![Call::Send(CHANNEL, Reply::Embed(embed::rules()))]
        );
    }

    #[tokio::test]
    async fn slash_command_responds_to_interaction() {
        let fake = FakeDiscord::new();
        let cfg = config();
        slash(TARGET_GUILD, "send").handle(&fake.ctx(&cfg)).await;
        assert_eq!(
            fake.calls(),
            vec![Call::Respond("send".to_owned(), Reply::Embed(embed::rules()))]
        );
    }
}
