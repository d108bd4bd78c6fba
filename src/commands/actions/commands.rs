//! Commands command handler.
//!
//! Lists every player command. Administrators also get the admin commands.

use log::debug;

use crate::commands::{CommandContext, CommandResult, cards::format_command_reference};

/// Returns the complete command reference. No lookup is performed.
pub fn handle_commands(context: &CommandContext) -> CommandResult {
    debug!(
        "handling commands command for {} (admin: {})",
        context.user_id, context.is_admin
    );

    CommandResult {
        response: format_command_reference(context.is_admin),
    }
}
