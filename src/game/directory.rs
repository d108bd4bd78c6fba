//! Read-only directory of locations and characters.
//!
//! [`GameDirectory`] wraps a [`Requester`] and turns game server responses into
//! the domain records used to render help cards.

use log::debug;

use crate::game::{
    DirectoryError,
    requester::Requester,
    response_structs::{CharacterResponse, LocationResponse},
    structs::{DockStatus, Location, LocationCategory, Presence, Services},
};

/// Location and character lookups backed by the game server.
///
/// # Examples
///
/// ```no_run
/// use starguide::game::{GameDirectory, GameRequester};
///
/// # async fn example() -> Result<(), starguide::game::DirectoryError> {
/// let directory = GameDirectory::new(GameRequester::new("https://game.example.com", "key"));
/// if let Some(location) = directory.find_by_channel("!room:example.com").await? {
///     println!("room is bound to {}", location.name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct GameDirectory<R: Requester> {
    /// Requester to interact with the game server
    requester: R,
}

impl<R: Requester> GameDirectory<R> {
    /// Create a new [GameDirectory].
    pub fn new(requester: R) -> Self {
        GameDirectory { requester }
    }

    /// Finds the location bound to a Matrix room.
    ///
    /// A room is bound to at most one location. `Ok(None)` means the room is not
    /// a location room.
    pub async fn find_by_channel(
        &self,
        channel_id: &str,
    ) -> Result<Option<Location>, DirectoryError> {
        let location = self
            .requester
            .get_location(channel_id)
            .await?
            .map(convert_location);

        debug!("room {} resolved to location {:?}", channel_id, location);
        Ok(location)
    }

    /// Finds where the character of a Matrix user currently is.
    ///
    /// `Ok(None)` means the user has no character.
    pub async fn find_presence(&self, user_id: &str) -> Result<Option<Presence>, DirectoryError> {
        let presence = self
            .requester
            .get_character(user_id)
            .await?
            .map(convert_presence);

        debug!("user {} resolved to presence {:?}", user_id, presence);
        Ok(presence)
    }
}

fn convert_location(response: LocationResponse) -> Location {
    Location {
        id: response.location_id,
        category: LocationCategory::parse(&response.location_type),
        name: response.name,
        services: Services {
            jobs: response.has_jobs,
            shops: response.has_shops,
            medical: response.has_medical,
            repairs: response.has_repairs,
            fuel: response.has_fuel,
            upgrades: response.has_upgrades,
        },
    }
}

fn convert_presence(response: CharacterResponse) -> Presence {
    Presence {
        dock_status: DockStatus::parse(&response.location_status),
        current_location: response.current_location,
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::game::requester::MockRequester;

    #[tokio::test]
    async fn test_find_by_channel() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_get_location()
            .with(eq("!station:example.com"))
            .times(1)
            .returning(|_| {
                Ok(Some(LocationResponse {
                    location_id: 4,
                    name: "Halcyon Ring".to_owned(),
                    location_type: "space_station".to_owned(),
                    has_jobs: true,
                    has_shops: false,
                    has_medical: true,
                    has_repairs: false,
                    has_fuel: false,
                    has_upgrades: true,
                }))
            });

        let directory = GameDirectory::new(mock_requester);
        let location = directory
            .find_by_channel("!station:example.com")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(location.id, 4);
        assert_eq!(location.name, "Halcyon Ring");
        assert_eq!(location.category, LocationCategory::SpaceStation);
        assert_eq!(
            location.services,
            Services {
                jobs: true,
                shops: false,
                medical: true,
                repairs: false,
                fuel: false,
                upgrades: true,
            }
        );
    }

    #[tokio::test]
    async fn test_find_by_channel_unbound_room() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_get_location()
            .times(1)
            .returning(|_| Ok(None));

        let directory = GameDirectory::new(mock_requester);
        let location = directory.find_by_channel("!lobby:example.com").await.unwrap();
        assert!(location.is_none());
    }

    #[tokio::test]
    async fn test_find_by_channel_propagates_errors() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_get_location()
            .times(1)
            .returning(|_| Err(DirectoryError::Status(502)));

        let directory = GameDirectory::new(mock_requester);
        let result = directory.find_by_channel("!room:example.com").await;
        assert!(matches!(result, Err(DirectoryError::Status(502))));
    }

    #[tokio::test]
    async fn test_find_presence() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_get_character()
            .with(eq("@alice:example.com"))
            .times(1)
            .returning(|_| {
                Ok(Some(CharacterResponse {
                    location_status: "docked".to_owned(),
                    current_location: Some(4),
                }))
            });

        let directory = GameDirectory::new(mock_requester);
        let presence = directory
            .find_presence("@alice:example.com")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(presence.dock_status, DockStatus::Docked);
        assert_eq!(presence.current_location, Some(4));
    }

    #[tokio::test]
    async fn test_find_presence_without_character() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_get_character()
            .times(1)
            .returning(|_| Ok(None));

        let directory = GameDirectory::new(mock_requester);
        assert!(
            directory
                .find_presence("@newcomer:example.com")
                .await
                .unwrap()
                .is_none()
        );
    }
}
