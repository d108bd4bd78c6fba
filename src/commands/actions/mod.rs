//! Command action handlers.
//!
//! One handler per bot command. Each handler receives the
//! [`CommandContext`](crate::commands::CommandContext) of the invocation and
//! returns a [`CommandResult`](crate::commands::CommandResult) holding the card
//! to send privately to the caller.
//!
//! - [`handle_help`] - Contextual help for the invoking room
//! - [`handle_commands`] - Complete command reference

mod commands;
mod help;

pub use crate::commands::actions::{commands::handle_commands, help::handle_help};
