//! Configuration file structures for the Starguide bot.
//!
//! The configuration is a YAML file split into three sections: the game server
//! API, the Matrix account and the bot behavior. Every value can be overridden
//! with a `STARGUIDE_` environment variable, using `__` between section and key.
//!
//! ```yaml
//! # Game server API
//! game:
//!   url: "https://game.example.com"
//!   api_key: "secret-api-key"
//!
//! # Matrix account
//! matrix:
//!   user_id: "@starguide:example.com"
//!   password: "secret-password"
//!   passphrase: "recovery-passphrase"
//!
//! # Optional bot settings
//! bot:
//!   name: "starguide"
//!   admins:
//!     - "@captain:example.com"
//! ```
//!
//! ```bash
//! export STARGUIDE_MATRIX__PASSWORD="secret-from-env"
//! ```

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Prefix of the environment variables overriding the configuration file.
const ENV_PREFIX: &str = "STARGUIDE_";

/// Root configuration structure.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Game server configuration
    pub game: Game,
    /// Matrix account configuration
    pub matrix: Matrix,
    /// Bot behavior, every field has a default
    #[serde(default)]
    pub bot: Bot,
}

/// Game server API configuration.
#[derive(Debug, Deserialize)]
pub struct Game {
    /// Base URL of the game server, with the protocol.
    ///
    /// A trailing slash is removed by [`Config::load`].
    pub url: String,

    /// Key sent with every request to the game server API.
    pub api_key: String,
}

/// Matrix account configuration.
#[derive(Debug, Deserialize)]
pub struct Matrix {
    /// Fully qualified Matrix user ID, e.g. `@starguide:example.com`.
    pub user_id: String,

    /// Matrix account password, only used for the first login.
    pub password: String,

    /// E2EE recovery passphrase, also used to encrypt the sqlite store.
    pub passphrase: String,
}

/// Bot behavior configuration.
#[derive(Debug, Deserialize)]
pub struct Bot {
    /// Name used after the `!` prefix to address the bot.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Matrix user IDs allowed to see the admin section of the command reference.
    #[serde(default)]
    pub admins: Vec<String>,
}

impl Default for Bot {
    fn default() -> Self {
        Bot {
            name: default_bot_name(),
            admins: Vec::new(),
        }
    }
}

fn default_bot_name() -> String {
    "starguide".to_owned()
}

impl Config {
    /// Loads the configuration from a YAML file, then applies the
    /// `STARGUIDE_` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, or if the merged
    /// configuration misses a required value or has a wrong type.
    pub fn load(path: &str) -> Result<Self, anyhow::Error> {
        if !Path::new(path).exists() {
            return Err(anyhow::anyhow!("config file {} does not exist", path));
        }

        let mut config: Config = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        while config.game.url.ends_with('/') {
            config.game.url.pop();
        }

        Ok(config)
    }

    /// Returns `true` if the Matrix user is listed in `bot.admins`.
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.bot.admins.iter().any(|admin| admin == user_id)
    }
}
