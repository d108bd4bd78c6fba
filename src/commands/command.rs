//! Command parsing.
//!
//! Converts a Matrix message body into a [`Command`]. The bot answers to
//! `!<name> help` and `!<name> commands`, where `<name>` is configurable.

use command_parser::Parser;
use log::debug;

use crate::commands::cards::format_unknown_command;

/// A parsed bot command. Neither command takes arguments.
#[derive(Debug, Hash, PartialEq, Eq)]
pub enum Command {
    /// Contextual help for the room the command was sent from
    Help,
    /// Complete command reference
    Commands,
}

/// Errors that can occur during command parsing.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParsingError {
    /// The message could not be parsed as a command
    UnableToParse,
    /// The command is addressed to another bot
    NotForBot,
    /// The subcommand is not recognized
    Unknown,
}

impl Command {
    /// Parses a message string into a Command.
    ///
    /// # Arguments
    ///
    /// * `parser` - The command parser
    /// * `bot_name` - Name the bot answers to, without the `!` prefix
    /// * `body` - The message text to parse
    ///
    /// # Errors
    ///
    /// - The message is not a command - [`CommandParsingError::UnableToParse`]
    /// - The command is for a different bot - [`CommandParsingError::NotForBot`]
    /// - The subcommand is not recognized - [`CommandParsingError::Unknown`]
    pub fn parse(parser: &Parser, bot_name: &str, body: &str) -> Result<Self, CommandParsingError> {
        // The parser drops the last word of the body
        let body = body.to_string() + " dummy";

        // Regular chat messages fail here
        let command = parser
            .parse(&body)
            .map_err(|_| CommandParsingError::UnableToParse)?;

        if command.name != bot_name {
            return Err(CommandParsingError::NotForBot);
        }

        debug!("parsing command: {:?}", command);

        match command.arguments.first().map(String::as_str) {
            None | Some("help") => Ok(Command::Help),
            Some("commands") => Ok(Command::Commands),
            Some(other) => {
                debug!("unknown subcommand {}", other);
                Err(CommandParsingError::Unknown)
            }
        }
    }
}

/// Formats a command error into a message for the room.
///
/// Only [`CommandParsingError::Unknown`] produces a message; other errors are
/// not addressed to the bot and get no answer.
pub fn format_command_error(error: CommandParsingError, bot_name: &str) -> Option<String> {
    match error {
        CommandParsingError::Unknown => Some(format_unknown_command(bot_name)),
        _ => None,
    }
}
