use crate::{config::Config, discord::Discord};

/// Collection of data that is shared across events
pub struct Context<'a> {
    // Wardenbot's own context types
    pub cfg: &'a Config,
    // Everything Discord-facing goes through here
    pub discord: &'a dyn Discord,
}
