//! Game server integration.
//!
//! The game server owns the location and character records. The bot only
//! reads them, through a small HTTP API.
//!
//! # Modules
//!
//! - `requester` - HTTP client for the game server API
//! - `response_structs` - Wire structures of the API responses
//! - `structs` - Domain records: locations, services, presences
//! - `directory` - Lookups converting responses into domain records

use std::fmt;

mod directory;
mod requester;
mod response_structs;
mod structs;

pub use crate::game::directory::GameDirectory;
#[cfg(test)]
pub use crate::game::requester::MockRequester;
pub use crate::game::requester::{GameRequester, Requester};
#[cfg(test)]
pub use crate::game::response_structs::{CharacterResponse, LocationResponse};
pub use crate::game::structs::{Location, LocationCategory, Services};

/// Errors raised while reading records from the game server.
///
/// A missing record is not an error: lookups return `Ok(None)` for it.
#[derive(Debug)]
pub enum DirectoryError {
    /// The request could not be sent or the body could not be decoded.
    Request(reqwest::Error),
    /// The game server refused the api key (HTTP 401/403).
    AccessError,
    /// The game server answered with an unexpected HTTP status.
    Status(u16),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DirectoryError::Request(e) => write!(f, "game server request failed: {}", e),
            DirectoryError::AccessError => write!(f, "unauthorized access to the game server"),
            DirectoryError::Status(status) => {
                write!(f, "game server answered with status {}", status)
            }
        }
    }
}

impl std::error::Error for DirectoryError {}

impl From<reqwest::Error> for DirectoryError {
    fn from(e: reqwest::Error) -> Self {
        DirectoryError::Request(e)
    }
}
