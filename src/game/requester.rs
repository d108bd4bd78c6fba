//! HTTP client for the game server API.
//!
//! This module provides the [`GameRequester`] struct for reading location and
//! character records from the game server.

use log::{debug, info};
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::game::{
    DirectoryError,
    response_structs::{CharacterResponse, LocationResponse},
};

/// HTTP client for requesting data from the game server.
///
/// Every request carries the configured api key as the `apiKey` query parameter.
///
/// # Examples
///
/// ```no_run
/// let requester = GameRequester::new("https://game.example.com", "secret");
/// let location = requester.get_location("!room:example.com").await?;
/// ```
pub struct GameRequester {
    /// Game server url, without trailing slash
    url: String,
    /// Key authorizing the bot on the game server
    api_key: String,
    /// HTTP client
    client: Client,
}

/// Trait for making requests to the game server.
///
/// A `None` result means the server answered `404`: the record does not exist.
#[automock]
pub trait Requester {
    /// Fetches the location bound to a Matrix room.
    async fn get_location(
        &self,
        channel_id: &str,
    ) -> Result<Option<LocationResponse>, DirectoryError>;
    /// Fetches the character of a Matrix user.
    async fn get_character(
        &self,
        user_id: &str,
    ) -> Result<Option<CharacterResponse>, DirectoryError>;
}

impl GameRequester {
    /// Create a new [GameRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the game server.
    /// * `api_key` - The key sent with every request.
    pub fn new(url: &str, api_key: &str) -> Self {
        GameRequester {
            url: url.to_string(),
            api_key: api_key.to_string(),
            client: Client::new(),
        }
    }

    /// Sends a GET request to `path` with a single lookup parameter and maps
    /// the status code: `404` is `None`, `401`/`403` is an access error.
    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
        value: &str,
    ) -> Result<Option<T>, DirectoryError> {
        let url = format!("{}{}", &self.url, path);
        debug!("request {}?{}={}", &url, key, value);

        let response = self
            .client
            .get(&url)
            .query(&[(key, value), ("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!("response from {}?{}={} -> not found", &url, key, value);
                Ok(None)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(DirectoryError::AccessError),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(DirectoryError::Status(status.as_u16())),
        }
    }
}

impl Requester for GameRequester {
    /// Request `/api/location?channelId={roomId}`.
    ///
    /// ```json
    /// {
    ///   "locationId": 12, "name": "New Ceres", "locationType": "colony",
    ///   "hasJobs": true, "hasShops": true, "hasMedical": false,
    ///   "hasRepairs": false, "hasFuel": true, "hasUpgrades": false
    /// }
    /// ```
    async fn get_location(
        &self,
        channel_id: &str,
    ) -> Result<Option<LocationResponse>, DirectoryError> {
        info!("request location of room {}", channel_id);

        let location: Option<LocationResponse> = self
            .get_optional("/api/location", "channelId", channel_id)
            .await?;

        debug!("location of room {} -> {:?}", channel_id, &location);
        Ok(location)
    }

    /// Request `/api/character?userId={userId}`.
    ///
    /// ```json
    /// { "locationStatus": "docked", "currentLocation": 12 }
    /// ```
    async fn get_character(
        &self,
        user_id: &str,
    ) -> Result<Option<CharacterResponse>, DirectoryError> {
        info!("request character of {}", user_id);

        let character: Option<CharacterResponse> = self
            .get_optional("/api/character", "userId", user_id)
            .await?;

        debug!("character of {} -> {:?}", user_id, &character);
        Ok(character)
    }
}
