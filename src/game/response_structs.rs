//! Response structures for the game server API endpoints.

use serde::Deserialize;

/// Location bound to a room, from `/api/location?channelId={roomId}`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    /// Unique identifier of the location.
    pub location_id: i64,
    /// Display name of the location.
    pub name: String,
    /// Snake_case category, e.g. `space_station`.
    pub location_type: String,
    #[serde(default)]
    pub has_jobs: bool,
    #[serde(default)]
    pub has_shops: bool,
    #[serde(default)]
    pub has_medical: bool,
    #[serde(default)]
    pub has_repairs: bool,
    #[serde(default)]
    pub has_fuel: bool,
    #[serde(default)]
    pub has_upgrades: bool,
}

/// Character of a user, from `/api/character?userId={userId}`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CharacterResponse {
    /// `docked`, `in_space`, or anything newer.
    pub location_status: String,
    /// Location the character is at, null while travelling.
    pub current_location: Option<i64>,
}
