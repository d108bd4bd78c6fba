//! Bot command parsing and help cards.
//!
//! This module turns Matrix messages into help cards for the players of the
//! galaxy.
//!
//! # Architecture
//!
//! ```text
//! Matrix Message
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: parse() + parse_command()
//! └─────────────┘
//!      │
//!      ├── parse() ──────────► command::Command
//!      │
//!      └── parse_command() ──► Action Handlers
//!                               - handle_help      (location / transit / basic)
//!                               - handle_commands  (command reference)
//!                                     │
//!                                     ▼
//!                               CommandResult (card)
//! ```
//!
//! # Command Structure
//!
//! | Command | Description |
//! |---------|-------------|
//! | `!starguide help` | Help for the room the command was sent from |
//! | `!starguide commands` | Every command, plus admin commands for admins |
//!
//! A bare `!starguide` is the same as `help`. The bot name is configurable.
//!
//! # Error Handling
//!
//! - [`CommandParseError::NotForBot`]: regular chat or another bot's command.
//!   Ignored silently.
//! - [`CommandParseError::InvalidCommand`]: unknown subcommand. Answered in the
//!   room with the contained message.
//!
//! Game server failures are returned by
//! [`Commander::parse_command`] and answered by the bot with
//! [`Commander::get_failure_card`].

mod actions;
pub mod card;
mod cards;
mod command;
mod commander;

pub use crate::commands::card::Card;
pub use crate::commands::commander::Commander;

/// Runtime context of one command invocation.
///
/// Built fresh for every message and never stored.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Matrix room ID where the command was issued
    pub room_id: String,
    /// Display name of that room
    pub room_name: String,
    /// Matrix user ID of the command issuer
    pub user_id: String,
    /// Whether the issuer is a bot administrator
    pub is_admin: bool,
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Card to send privately to the issuer
    pub response: Card,
}

/// Errors that can occur during command parsing.
///
/// # Examples
///
/// ```no_run
/// let commander = Commander::new("starguide");
///
/// match commander.parse("!starguide warp") {
///     Err(CommandParseError::NotForBot) => {}
///     Err(CommandParseError::InvalidCommand(msg)) => println!("{}", msg),
///     Ok(command) => println!("{:?}", command),
/// }
/// ```
#[derive(Debug)]
pub enum CommandParseError {
    /// Message is not for this bot (silent error)
    NotForBot,
    /// Unknown command, with the message to send back
    InvalidCommand(String),
}
