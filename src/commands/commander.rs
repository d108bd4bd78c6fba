//! Command orchestration and execution.
//!
//! [`Commander`] is the entry point for processing bot commands. It works in
//! two phases:
//!
//! ```text
//! Matrix Message → parse() → Command → parse_command() → CommandResult
//! ```

use command_parser::Parser;

use crate::{
    commands::{
        CommandContext, CommandParseError, CommandResult,
        actions::{handle_commands, handle_help},
        card::Card,
        cards::format_failure,
        command::{Command, format_command_error},
    },
    game::{DirectoryError, GameDirectory, Requester},
};

/// Command orchestrator for parsing and executing bot commands.
///
/// Commands start with `!` followed by the bot name. Messages for another bot
/// and regular chat are ignored ([`CommandParseError::NotForBot`]).
pub struct Commander {
    /// Command parser for processing user commands
    parser: Parser,
    /// Name the bot answers to
    bot_name: String,
}

impl Commander {
    /// Creates a new Commander answering to `!{bot_name}`.
    pub fn new(bot_name: &str) -> Self {
        Commander {
            parser: Parser::new('!', '-'),
            bot_name: bot_name.to_string(),
        }
    }

    /// Parses a Matrix message body into a command.
    ///
    /// # Returns
    ///
    /// * `Ok(Command)` - The message is a command for this bot
    /// * `Err(CommandParseError::NotForBot)` - Regular chat or another bot's command
    /// * `Err(CommandParseError::InvalidCommand)` - Unknown subcommand, with the reply to send
    pub fn parse(&self, body: &str) -> Result<Command, CommandParseError> {
        Command::parse(&self.parser, &self.bot_name, body).map_err(|error| {
            match format_command_error(error, &self.bot_name) {
                Some(message) => CommandParseError::InvalidCommand(message),
                None => CommandParseError::NotForBot,
            }
        })
    }

    /// Executes a parsed command and returns the card to deliver.
    ///
    /// # Command Handlers
    ///
    /// - [`Command::Help`] → [`handle_help`]
    /// - [`Command::Commands`] → [`handle_commands`]
    ///
    /// # Errors
    ///
    /// Game server failures met by the help lookups are returned as is.
    pub async fn parse_command<R: Requester>(
        &self,
        command: &Command,
        context: &CommandContext,
        directory: &GameDirectory<R>,
    ) -> Result<CommandResult, DirectoryError> {
        match command {
            Command::Help => handle_help(context, directory).await,
            Command::Commands => Ok(handle_commands(context)),
        }
    }

    /// Card sent to the caller when a command could not be executed.
    pub fn get_failure_card() -> Card {
        format_failure()
    }
}
