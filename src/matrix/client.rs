//! Matrix client wrapper for bot messaging and synchronization.
//!
//! [`MatrixClient`] wraps the Matrix SDK client. It replies in rooms and sends
//! help cards privately, in the direct-message room shared with the player.

use std::{collections::HashMap, path::Path, sync::Arc};

use anyhow::Context;
use log::{debug, error, info};
use matrix_sdk::{
    Client, Room, RoomState,
    ruma::{
        EventId, OwnedRoomId, OwnedUserId, RoomId, UserId,
        events::room::{
            member::MembershipState,
            message::{
                AddMentions, FormattedBody, ForwardThread, ReplyMetadata, RoomMessageEventContent,
            },
        },
    },
};
use tokio::sync::Mutex;

use crate::{
    commands::Card,
    matrix::{
        IncomingMessage, UserCredentials, encryption::setup_client, session::SessionStore,
        sync::MatrixSync,
    },
};

const DISPLAY_NAME: &str = "Starguide";

/// High-level Matrix client for bot messaging operations.
pub struct MatrixClient {
    /// Synchronization service for handling real-time events
    matrix_sync: MatrixSync,
    /// Underlying Matrix SDK client
    client: Client,
    /// Direct-message room used for each user. The per-user lock keeps
    /// concurrent requests from creating two rooms.
    dm_rooms: Mutex<HashMap<OwnedUserId, Arc<Mutex<Option<OwnedRoomId>>>>>,
}

impl MatrixClient {
    /// Logs the bot in, restoring the session found in `data_dir` if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the login or the encryption setup fails.
    pub async fn new(
        user_credentials: &UserCredentials,
        data_dir: &Path,
    ) -> Result<Self, anyhow::Error> {
        let store = SessionStore::open(data_dir).await;
        let client = setup_client(user_credentials, &store)
            .await
            .context("failed to setup matrix client")?;

        client
            .account()
            .set_display_name(Some(DISPLAY_NAME))
            .await?;

        let matrix_sync = MatrixSync::new(&client, &store);

        Ok(MatrixClient {
            matrix_sync,
            client,
            dm_rooms: Mutex::new(HashMap::new()),
        })
    }

    /// Starts the Matrix synchronization loop.
    ///
    /// `on_message` is invoked for each text message received in a joined room.
    pub async fn sync<F>(&self, on_message: F) -> Result<(), anyhow::Error>
    where
        F: Fn(IncomingMessage) + Send + Sync + 'static,
    {
        match self.matrix_sync.sync(on_message).await {
            Ok(_) => info!("matrix sync ended successfully"),
            Err(e) => error!("matrix sync ended with error: {:?}", e),
        }

        Ok(())
    }

    /// Replies to a message in its room. The body is Markdown.
    pub async fn send_reply(
        &self,
        room_id: &str,
        sender_id: &str,
        event_id: &str,
        body: &str,
    ) -> Result<(), anyhow::Error> {
        let sender = UserId::parse(sender_id)?;
        let event = EventId::parse(event_id)?;

        let content = RoomMessageEventContent::text_markdown(body).make_reply_to(
            ReplyMetadata::new(&event, &sender, None),
            ForwardThread::No,
            AddMentions::No,
        );

        let room_id = RoomId::parse(room_id)?;
        let room = self
            .client
            .get_room(&room_id)
            .with_context(|| format!("unknown room {}", room_id))?;
        room.send(content).await?;
        Ok(())
    }

    /// Sends a card that only `user_id` can read.
    ///
    /// The card goes to the direct-message room between the bot and the user.
    /// A new room is created on first use, or when the user left the
    /// previous one.
    pub async fn send_private(&self, user_id: &str, card: &Card) -> Result<(), anyhow::Error> {
        let user_id = UserId::parse(user_id)?;
        let room = self.dm_room(&user_id).await?;

        debug!("sending card {:?} to {}", card.title, user_id);
        room.send(card_content(card)).await?;
        Ok(())
    }

    /// Returns a direct-message room the user can read, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the room members cannot be fetched or the room
    /// cannot be created.
    async fn dm_room(&self, user_id: &UserId) -> Result<Room, anyhow::Error> {
        let slot = {
            let mut dm_rooms = self.dm_rooms.lock().await;
            Arc::clone(dm_rooms.entry(user_id.to_owned()).or_default())
        };
        let mut cached = slot.lock().await;

        let known = cached
            .as_deref()
            .and_then(|room_id| self.client.get_room(room_id))
            .or_else(|| self.client.get_dm_room(user_id));

        if let Some(room) = known {
            let member = room.get_member(user_id).await?;
            if can_receive(room.state(), member.as_ref().map(|m| m.membership())) {
                *cached = Some(room.room_id().to_owned());
                return Ok(room);
            }
            info!(
                "{} is no longer in direct-message room {}",
                user_id,
                room.room_id()
            );
        }

        info!("creating direct-message room with {}", user_id);
        let room = self.client.create_dm(user_id).await?;
        *cached = Some(room.room_id().to_owned());
        Ok(room)
    }
}

/// A message sent in a room reaches a user when the bot is joined and the user
/// is joined or invited.
fn can_receive(bot_state: RoomState, membership: Option<&MembershipState>) -> bool {
    bot_state == RoomState::Joined
        && matches!(
            membership,
            Some(MembershipState::Join | MembershipState::Invite)
        )
}

/// Message content of a card: Markdown body, HTML body carrying the accent.
fn card_content(card: &Card) -> RoomMessageEventContent {
    match FormattedBody::markdown(card.to_colored_markdown()) {
        Some(formatted) => RoomMessageEventContent::text_html(card.to_markdown(), formatted.body),
        None => RoomMessageEventContent::text_plain(card.to_markdown()),
    }
}

#[cfg(test)]
mod tests {
    use matrix_sdk::ruma::events::room::message::MessageType;

    use super::*;
    use crate::commands::card::Accent;

    #[test]
    fn test_card_content() {
        let card = Card::new("🚀 In Transit", "You're travelling", Accent(0xff6600))
            .section("⚠️ Transit Limitations", ["• No shopping or job services"])
            .footer("Enjoy the journey!");

        let content = card_content(&card);
        let MessageType::Text(text) = content.msgtype else {
            panic!("expected a text message");
        };

        assert_eq!(text.body, card.to_markdown());
        let html = text.formatted.unwrap().body;
        assert!(html.contains("data-mx-color=\"#ff6600\""));
        assert!(html.contains("<strong>⚠️ Transit Limitations</strong>"));
    }

    #[test]
    fn test_card_content_escapes_location_name() {
        let card = Card::new(
            "🏙️ Smith & Sons <Depot> - Command Guide",
            "Available commands and services at this colony",
            Accent(0xffa500),
        );

        let MessageType::Text(text) = card_content(&card).msgtype else {
            panic!("expected a text message");
        };
        let html = text.formatted.unwrap().body;

        assert!(html.contains("Smith &amp; Sons &lt;Depot&gt; - Command Guide</font>"));
        assert!(!html.contains("<Depot>"));
    }

    #[test]
    fn test_can_receive() {
        assert!(can_receive(RoomState::Joined, Some(&MembershipState::Join)));
        assert!(can_receive(RoomState::Joined, Some(&MembershipState::Invite)));
        assert!(!can_receive(RoomState::Joined, Some(&MembershipState::Leave)));
        assert!(!can_receive(RoomState::Joined, Some(&MembershipState::Ban)));
        assert!(!can_receive(RoomState::Joined, None));
        assert!(!can_receive(RoomState::Left, Some(&MembershipState::Join)));
        assert!(!can_receive(RoomState::Invited, Some(&MembershipState::Join)));
    }
}
