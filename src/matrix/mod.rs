//! Matrix protocol integration for the bot.
//!
//! [`MatrixClient`] coordinates:
//! - **Encryption**: login, cross signing and recovery (`encryption`)
//! - **Session**: login and sync token persistence (`session`)
//! - **Sync**: auto-join and incoming messages (`sync`)
//!
//! # Examples
//!
//! ```no_run
//! let credentials = UserCredentials {
//!     user_id: "@starguide:example.com".to_string(),
//!     password: "password".to_string(),
//!     passphrase: "recovery_phrase".to_string(),
//! };
//!
//! let client = MatrixClient::new(&credentials, Path::new("./data")).await?;
//! ```

mod client;
mod encryption;
mod session;
mod sync;

pub use crate::matrix::client::MatrixClient;

/// User credentials for a Matrix account
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// User ID of the matrix account
    pub user_id: String,
    /// Password of the matrix account
    pub password: String,
    /// Passphrase to recover the matrix account secrets
    pub passphrase: String,
}

/// A text message received in a joined room.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Text of the message
    pub body: String,
    /// Room the message was sent in
    pub room_id: String,
    /// Display name of that room, empty when the room has none
    pub room_name: String,
    /// Author of the message
    pub sender_id: String,
    /// Event ID of the message, used to reply to it
    pub event_id: String,
}
