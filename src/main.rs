//! Starguide - A Matrix bot serving contextual help for a space RPG.
//!
//! Players of the galaxy type `!starguide help` in any room. The bot works out
//! what the room is and sends them, privately, the matching help card:
//!
//! - **Location rooms**: commands, services, tips and dock status for the
//!   location bound to the room
//! - **Transit rooms** (name containing `transit`): what can be done while
//!   travelling
//! - **Other rooms**: the general command guide and a quick start checklist
//!
//! `!starguide commands` sends the complete command reference, with the admin
//! commands for the administrators listed in the configuration.
//!
//! # Configuration
//!
//! ```yaml
//! game:
//!   url: "https://game.example.com"
//!   api_key: "secret-api-key"
//!
//! matrix:
//!   user_id: "@starguide:example.com"
//!   password: "your-password"
//!   passphrase: "your-recovery-passphrase"
//!
//! bot:
//!   name: "starguide"
//!   admins:
//!     - "@captain:example.com"
//! ```
//!
//! Any value can be overridden with a `STARGUIDE_` environment variable, e.g.
//! `STARGUIDE_MATRIX__PASSWORD`.
//!
//! # Usage
//!
//! ```bash
//! starguide --config config.yaml --data ./starguide-data
//! ```
//!
//! `RUST_LOG` controls the log level (default: `info`).
//!
//! # Modules
//!
//! - [`bot`] - Message handling loop
//! - [`commands`] - Command parsing and help cards
//! - [`config`] - YAML configuration with environment overrides
//! - [`game`] - Game server API client and location lookups
//! - [`matrix`] - Matrix client, encryption and session persistence

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bot;
mod commands;
mod config;
mod game;
mod matrix;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: String,

    /// Directory for persistent data.
    ///
    /// Holds the Matrix login and the encryption store, keep it private.
    #[arg(short, long)]
    data: String,
}

#[tokio::main]
async fn main() {
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("starting starguide {}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load config file: {}", e);
            return;
        }
    };

    let bot = match Bot::new(config, args).await {
        Ok(bot) => bot,
        Err(e) => {
            error!("failed to initialize bot: {:?}", e);
            return;
        }
    };

    if let Err(e) = bot.start().await {
        error!("bot stopped: {:?}", e);
    }
}
