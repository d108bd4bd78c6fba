//! Matrix synchronization and event handling.
//!
//! [`MatrixSync::sync`] catches up on the events received while the bot was
//! offline (mostly invites), then forwards every new text message of a joined
//! room to a callback, persisting the sync token after each sync.

use std::sync::Arc;

use anyhow::Result;
use log::{error, info, warn};
use matrix_sdk::{
    Client, LoopCtrl, Room, RoomState,
    config::SyncSettings,
    ruma::{
        api::client::filter::FilterDefinition,
        events::room::{
            member::StrippedRoomMemberEvent,
            message::{MessageType, OriginalSyncRoomMessageEvent},
        },
    },
};
use tokio::time::{Duration, sleep};

use crate::matrix::{IncomingMessage, session::SessionStore};

/// Longest wait between two attempts to join a room.
const MAX_JOIN_DELAY_SECS: u64 = 3600;

/// Synchronization loop of the bot account.
pub struct MatrixSync {
    /// The matrix client
    client: Client,
    /// Where the sync token is saved
    store: SessionStore,
}

impl MatrixSync {
    pub fn new(client: &Client, store: &SessionStore) -> Self {
        MatrixSync {
            client: client.clone(),
            store: store.clone(),
        }
    }

    /// Syncs forever, calling `on_message` for each new text message.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync loop fails. Failures to persist the sync
    /// token are only logged.
    pub async fn sync<F>(&self, on_message: F) -> Result<()>
    where
        F: Fn(IncomingMessage) + Send + Sync + 'static,
    {
        info!("start syncing");

        self.client.add_event_handler(auto_join_rooms);

        // Lazy-load room members
        let filter = FilterDefinition::with_lazy_loading();
        let mut sync_settings = SyncSettings::default().filter(filter.into());
        if let Some(sync_token) = self.store.sync_token() {
            sync_settings = sync_settings.token(sync_token);
        }

        // Catch up first so that messages sent while offline are not answered
        let response = loop {
            match self.client.sync_once(sync_settings.clone()).await {
                Ok(response) => break response,
                Err(e) => error!("initial sync failed, trying again: {e}"),
            }
        };
        self.persist_token(response.next_batch.clone()).await;
        sync_settings = sync_settings.token(response.next_batch);

        let on_message = Arc::new(on_message);
        self.client.add_event_handler({
            let on_message = Arc::clone(&on_message);
            move |event: OriginalSyncRoomMessageEvent, room: Room| {
                let on_message = Arc::clone(&on_message);
                async move { on_room_message(event, room, on_message.as_ref()) }
            }
        });

        self.client
            .sync_with_result_callback(sync_settings, |sync_result| async move {
                let response = sync_result?;
                self.persist_token(response.next_batch).await;
                Ok(LoopCtrl::Continue)
            })
            .await?;

        Ok(())
    }

    async fn persist_token(&self, sync_token: String) {
        if let Err(e) = self.store.save_sync_token(sync_token).await {
            error!("failed to persist sync token: {:?}", e);
        }
    }
}

/// Joins the rooms the bot is invited to, retrying with a growing delay.
async fn auto_join_rooms(room_member: StrippedRoomMemberEvent, client: Client, room: Room) {
    let Some(user_id) = client.user_id() else {
        warn!("could not get user id from client");
        return;
    };

    if room_member.state_key != user_id {
        return;
    }

    tokio::spawn(async move {
        info!("auto joining room {}", room.room_id());
        let mut delay = 2;

        // Synapse may send the invite before the room can be joined
        // https://github.com/matrix-org/synapse/issues/4345
        while let Err(e) = room.join().await {
            if delay > MAX_JOIN_DELAY_SECS {
                error!("giving up joining room {} ({e:?})", room.room_id());
                return;
            }
            warn!(
                "failed to join room {} ({e:?}), retrying in {delay}s",
                room.room_id()
            );
            sleep(Duration::from_secs(delay)).await;
            delay *= 2;
        }
        info!("joined room {}", room.room_id());
    });
}

fn on_room_message<F>(event: OriginalSyncRoomMessageEvent, room: Room, on_message: &F)
where
    F: Fn(IncomingMessage),
{
    if room.state() != RoomState::Joined {
        return;
    }

    let MessageType::Text(text_content) = event.content.msgtype else {
        return;
    };

    on_message(IncomingMessage {
        body: text_content.body,
        room_id: room.room_id().to_string(),
        room_name: room.name().unwrap_or_default(),
        sender_id: event.sender.to_string(),
        event_id: event.event_id.to_string(),
    });
}
