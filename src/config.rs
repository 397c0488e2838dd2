use anyhow::{anyhow, Result};
use serenity::all::GuildId;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

const CONFIG_PATH_REL_HOME: &str = ".config/wardenbot/config.toml";

/// Environment variable holding the bot token.  Required.
pub const TOKEN_ENV: &str = "DISCORD_TOKEN";
/// Environment variable holding the game server address shown by `ip`.  Optional.
pub const SERVER_IP_ENV: &str = "Ip";

/// Bot configuration.  Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub general: General,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct General {
    /// The one guild the guild-scoped handlers act on
    pub guild_id: GuildId,
    pub command_prefixes: Vec<String>,
    /// Name of the text channel moderation events are mirrored into
    pub log_channel: String,
    pub server_ip: Option<String>,
    /// Messages kept in the cache so deletions can be mirrored with their content
    pub message_cache_size: usize,
}

impl Default for General {
    fn default() -> Self {
        Self {
            guild_id: GuildId::new(1470045879145857066),
            command_prefixes: vec!["!".to_owned(), "?".to_owned()],
            log_channel: "log".to_owned(),
            server_ip: None,
            message_cache_size: 500,
        }
    }
}

#[derive(Default, serde::Deserialize)]
struct ConfigFile {
    #[serde(default)]
    general: General,
}

impl Config {
    fn config_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|p| p.join(CONFIG_PATH_REL_HOME))
            .ok_or(anyhow!("Could not find home directory"))
    }

    /// Load the optional config file, then layer the environment on top.
    pub async fn load() -> Result<Self> {
        // A missing `.env` is normal outside development.
        let _ = dotenvy::dotenv();

        let path = Self::config_path()?;
        let contents = match tokio::fs::File::open(&path).await {
            Ok(mut file) => {
                let mut contents = String::new();
                file.read_to_string(&mut contents).await.map_err(|e| {
                    anyhow!(
                        "Could not read configuration at `{}`: {}",
                        path.to_string_lossy(),
                        e
                    )
                })?;
                Some(contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(anyhow!(
                    "Could not open configuration at `{}`: {}",
                    path.to_string_lossy(),
                    e
                ))
            }
        };

        Self::from_sources(contents.as_deref(), |key| std::env::var(key).ok()).map_err(|e| {
            anyhow!(
                "Invalid configuration (file `{}`): {}",
                path.to_string_lossy(),
                e
            )
        })
    }

    /// Build a configuration from the config file contents (if any) and an environment lookup.
    pub fn from_sources(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let file: ConfigFile = match file {
            Some(contents) => toml::from_str(contents)
                .map_err(|e| anyhow!("Could not parse configuration: {}", e))?,
            None => ConfigFile::default(),
        };
        let mut general = file.general;

        let discord_token = env(TOKEN_ENV)
            .filter(|token| !token.trim().is_empty())
            .ok_or(anyhow!("{} environment variable not set", TOKEN_ENV))?;

        if let Some(ip) = env(SERVER_IP_ENV) {
            general.server_ip = Some(ip);
        }
        // An empty address is as good as none
        general.server_ip = general.server_ip.filter(|ip| !ip.is_empty());

        if general.command_prefixes.iter().any(|prefix| prefix.is_empty()) {
            return Err(anyhow!("Command prefixes must not be empty"));
        }

        Ok(Self {
            discord_token,
            general,
        })
    }

    pub fn is_target_guild(&self, guild_id: Option<GuildId>) -> bool {
        guild_id == Some(self.general.guild_id)
    }

    /// The prefix shown in usage lines
    pub fn display_prefix(&self) -> &str {
        self.general
            .command_prefixes
            .last()
            .map(String::as_str)
            .unwrap_or("?")
    }
}
