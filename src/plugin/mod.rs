use crate::{config::Config, context::Context, discord::SlashSpec, event::EventHandled};
use anyhow::Result;
use serenity::all::Permissions;

mod debug;
mod delete_log;
mod help;
mod ignore_bots;
mod ip;
mod kick;
mod purge;
mod ready;
mod role;
mod role_log;
mod send;
mod server_info;
mod welcome;

#[serenity::async_trait]
pub trait Plugin: Sync + Send {
    /// Plugin name.  For command plugins this is also the command.
    fn name(&self) -> &'static str;
    /// Help message line.  None if no help message
    fn usage(&self, cfg: &Config) -> Option<String>;
    /// Permissions the invoker of this plugin's command must hold.  Checked by the router before
    /// `handle` sees the command.
    fn permissions(&self) -> Permissions {
        Permissions::empty()
    }
    /// Whether the command only exists in the configured guild.  Elsewhere the router drops it
    /// silently, before any permission check.
    fn target_guild_only(&self) -> bool {
        false
    }
    /// Slash command to register for the configured guild, if any
    fn slash(&self) -> Option<SlashSpec> {
        None
    }
    /// Potentially handle event.  Returns:
    /// - Ok(EventHandled::Yes) if the event has been handled and no other plugin should attempt to
    /// handle it
    /// - Ok(EventHandled::No) if another plugin should attempt to handle the event
    /// - Err if an error occurred
    async fn handle(&self, ctx: &Context<'_>, event: &crate::event::Event) -> Result<EventHandled>;
}

/// Ordered list of available plugins
pub fn plugins() -> Vec<Box<dyn Plugin>> {
    vec![
        // Core bot operations
        Box::new(debug::Debug),
        Box::new(ignore_bots::IgnoreBots),
        Box::new(ready::Ready),
        Box::new(help::Help),
        // Community
        Box::new(send::SendRules),
        Box::new(ip::Ip),
        Box::new(server_info::ServerInfo),
        // Moderation
        Box::new(kick::Kick),
        Box::new(role::Roles),
        Box::new(purge::PurgeMessages),
        // Membership and audit mirroring
        Box::new(welcome::Welcome),
        Box::new(role_log::RoleLog),
        Box::new(delete_log::DeleteLog),
    ]
}

/// `<prefix><name>` followed by the argument synopsis
fn command_usage(cfg: &Config, name: &str, synopsis: &str) -> String {
    let mut line = format!("{}{}", cfg.display_prefix(), name);
    if !synopsis.is_empty() {
        line.push(' ');
        line.push_str(synopsis);
    }
    line
}

/// A help line: the command usage and what it does
fn usage_line(cfg: &Config, name: &str, synopsis: &str, description: &str) -> String {
    format!("{} - {}", command_usage(cfg, name, synopsis), description)
}
