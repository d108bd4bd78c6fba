//! Main bot wiring.
//!
//! [`Bot`] connects the Matrix account, the game server directory and the
//! command pipeline. Every incoming message is handled in its own task:
//!
//! 1. regular chat and commands for other bots are ignored;
//! 2. unknown subcommands get a reply in the room;
//! 3. `help` and `commands` produce a card, sent privately to the caller.

use std::{path::Path, sync::Arc};

use log::{error, info};
use tokio::fs;

use crate::{
    Args,
    commands::{CommandContext, CommandParseError, Commander},
    config::Config,
    game::{GameDirectory, GameRequester},
    matrix::{IncomingMessage, MatrixClient, UserCredentials},
};

/// Everything a message task needs.
struct MessageContext {
    message: IncomingMessage,
    matrix_client: Arc<MatrixClient>,
    directory: Arc<GameDirectory<GameRequester>>,
    commander: Arc<Commander>,
    config: Arc<Config>,
}

pub struct Bot {
    matrix_client: Arc<MatrixClient>,

    directory: Arc<GameDirectory<GameRequester>>,

    commander: Arc<Commander>,

    config: Arc<Config>,
}

impl Bot {
    /// Creates the bot: logs into Matrix and prepares the game server client.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the Matrix
    /// login fails.
    pub async fn new(config: Config, args: Args) -> Result<Self, anyhow::Error> {
        let session_dir = Path::new(&args.data).join("session");
        fs::create_dir_all(&session_dir).await?;

        let matrix_client = Arc::new(
            MatrixClient::new(
                &UserCredentials {
                    user_id: config.matrix.user_id.clone(),
                    password: config.matrix.password.clone(),
                    passphrase: config.matrix.passphrase.clone(),
                },
                &session_dir,
            )
            .await?,
        );

        let directory = Arc::new(GameDirectory::new(GameRequester::new(
            &config.game.url,
            &config.game.api_key,
        )));
        let commander = Arc::new(Commander::new(&config.bot.name));

        info!(
            "answering to !{} with {} admin(s)",
            config.bot.name,
            config.bot.admins.len()
        );

        Ok(Bot {
            matrix_client,
            directory,
            commander,
            config: Arc::new(config),
        })
    }

    /// Syncs with Matrix until the process stops.
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let matrix_client = Arc::clone(&self.matrix_client);
        let directory = Arc::clone(&self.directory);
        let commander = Arc::clone(&self.commander);
        let config = Arc::clone(&self.config);

        let on_message = move |message: IncomingMessage| {
            Self::handle_matrix_message(MessageContext {
                message,
                matrix_client: Arc::clone(&matrix_client),
                directory: Arc::clone(&directory),
                commander: Arc::clone(&commander),
                config: Arc::clone(&config),
            })
        };

        self.matrix_client.sync(on_message).await
    }

    fn handle_matrix_message(ctx: MessageContext) {
        tokio::spawn(async move {
            let message = &ctx.message;

            let command = match ctx.commander.parse(&message.body) {
                Ok(command) => command,
                Err(CommandParseError::NotForBot) => return,
                Err(CommandParseError::InvalidCommand(reply)) => {
                    if let Err(e) = ctx
                        .matrix_client
                        .send_reply(&message.room_id, &message.sender_id, &message.event_id, &reply)
                        .await
                    {
                        error!("failed to reply in {}: {:?}", message.room_id, e);
                    }
                    return;
                }
            };

            let command_context = CommandContext {
                room_id: message.room_id.clone(),
                room_name: message.room_name.clone(),
                user_id: message.sender_id.clone(),
                is_admin: ctx.config.is_admin(&message.sender_id),
            };

            let card = match ctx
                .commander
                .parse_command(&command, &command_context, ctx.directory.as_ref())
                .await
            {
                Ok(result) => result.response,
                Err(e) => {
                    error!(
                        "failed to run {:?} for {} in {}: {}",
                        command, message.sender_id, message.room_id, e
                    );
                    Commander::get_failure_card()
                }
            };

            if let Err(e) = ctx
                .matrix_client
                .send_private(&message.sender_id, &card)
                .await
            {
                error!("failed to send card to {}: {:?}", message.sender_id, e);
            }
        });
    }
}
