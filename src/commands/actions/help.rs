//! Help command handler.
//!
//! Picks the help card matching the room the command was sent from:
//! 1. the room is bound to a location: location card;
//! 2. the room name contains `transit`, in any casing: transit card;
//! 3. otherwise: basic card.

use log::debug;

use crate::{
    commands::{
        CommandContext, CommandResult,
        cards::{format_basic_help, format_location_help, format_transit_help},
    },
    game::{DirectoryError, GameDirectory, Requester},
};

const TRANSIT_KEYWORD: &str = "transit";

/// Returns the contextual help card for the room in `context`.
///
/// The caller's presence is only looked up for location rooms. Directory
/// failures are returned untouched.
pub async fn handle_help<R: Requester>(
    context: &CommandContext,
    directory: &GameDirectory<R>,
) -> Result<CommandResult, DirectoryError> {
    debug!("handling help command in {}", context.room_id);

    if let Some(location) = directory.find_by_channel(&context.room_id).await? {
        let is_docked = directory
            .find_presence(&context.user_id)
            .await?
            .is_some_and(|presence| presence.is_docked_at(location.id));

        debug!(
            "location help for {} (docked: {})",
            location.name, is_docked
        );
        return Ok(CommandResult {
            response: format_location_help(&location, is_docked),
        });
    }

    let response = if is_transit_room(&context.room_name) {
        debug!("transit help for room {}", context.room_name);
        format_transit_help()
    } else {
        debug!("basic help for room {}", context.room_name);
        format_basic_help()
    };

    Ok(CommandResult { response })
}

fn is_transit_room(room_name: &str) -> bool {
    room_name.to_lowercase().contains(TRANSIT_KEYWORD)
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        commands::cards::{
            DOCKED_STATUS, IN_ORBIT_STATUS, NO_SERVICES_SECTION, SERVICES_SECTION, STATUS_SECTION,
            TIPS_SECTION,
        },
        game::{CharacterResponse, LocationResponse, MockRequester},
    };

    fn context(room_name: &str) -> CommandContext {
        CommandContext {
            room_id: "!room:example.com".to_string(),
            room_name: room_name.to_string(),
            user_id: "@pilot:example.com".to_string(),
            is_admin: false,
        }
    }

    fn location_response(id: i64, location_type: &str) -> LocationResponse {
        LocationResponse {
            location_id: id,
            name: "New Ceres".to_string(),
            location_type: location_type.to_string(),
            has_jobs: false,
            has_shops: false,
            has_medical: false,
            has_repairs: false,
            has_fuel: false,
            has_upgrades: false,
        }
    }

    fn character(status: &str, location: Option<i64>) -> Option<CharacterResponse> {
        Some(CharacterResponse {
            location_status: status.to_string(),
            current_location: location,
        })
    }

    /// Requester for a room without location. The character is never requested.
    fn unbound_room() -> MockRequester {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_get_location()
            .with(eq("!room:example.com"))
            .times(1)
            .returning(|_| Ok(None));
        mock_requester.expect_get_character().never();
        mock_requester
    }

    fn location_room(
        location: LocationResponse,
        presence: Option<CharacterResponse>,
    ) -> MockRequester {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_get_location()
            .times(1)
            .returning(move |_| Ok(Some(location.clone())));
        mock_requester
            .expect_get_character()
            .with(eq("@pilot:example.com"))
            .times(1)
            .returning(move |_| Ok(presence.clone()));
        mock_requester
    }

    #[tokio::test]
    async fn test_basic_help() {
        let directory = GameDirectory::new(unbound_room());
        let result = handle_help(&context("general"), &directory).await.unwrap();

        assert_eq!(result.response, format_basic_help());
    }

    #[tokio::test]
    async fn test_transit_help_any_casing() {
        for room_name in ["transit-7", "TRANSIT LANE", "Deep Transit", "corridor_transit"] {
            let directory = GameDirectory::new(unbound_room());
            let result = handle_help(&context(room_name), &directory).await.unwrap();

            assert_eq!(result.response, format_transit_help(), "{}", room_name);
        }
    }

    #[tokio::test]
    async fn test_location_overrides_room_name() {
        let directory = GameDirectory::new(location_room(location_response(3, "gate"), None));
        let result = handle_help(&context("transit-gate"), &directory)
            .await
            .unwrap();

        assert_eq!(result.response.title, "🌌 New Ceres - Command Guide");
        let tips = result.response.get_section(TIPS_SECTION).unwrap();
        assert_eq!(tips.lines.len(), 4);
        assert!(tips.lines[0].contains("Massive structures"));
    }

    #[tokio::test]
    async fn test_location_unknown_category() {
        let directory = GameDirectory::new(location_room(
            location_response(3, "unknown_category_xyz"),
            None,
        ));
        let result = handle_help(&context("somewhere"), &directory).await.unwrap();
        let card = result.response;

        assert!(card.title.starts_with("📍"));
        assert!(card.get_section(TIPS_SECTION).is_none());
        assert!(card.get_section("🎮 Core Commands").is_some());
        assert!(card.get_section(NO_SERVICES_SECTION).is_some());
        assert!(card.get_section("📻 Communication").is_some());
        assert_eq!(
            card.get_section(STATUS_SECTION).unwrap().lines,
            vec![IN_ORBIT_STATUS]
        );
    }

    #[tokio::test]
    async fn test_docked_truth_table() {
        let cases = [
            (None, false),
            (character("docked", Some(12)), true),
            (character("docked", Some(13)), false),
            (character("docked", None), false),
            (character("in_space", Some(12)), false),
            (character("landing", Some(12)), false),
        ];

        for (presence, expected) in cases {
            let directory = GameDirectory::new(location_room(
                location_response(12, "outpost"),
                presence.clone(),
            ));
            let result = handle_help(&context("outpost"), &directory).await.unwrap();
            let expected_status = if expected { DOCKED_STATUS } else { IN_ORBIT_STATUS };

            assert_eq!(
                result.response.get_section(STATUS_SECTION).unwrap().lines,
                vec![expected_status],
                "{:?}",
                presence
            );
        }
    }

    #[tokio::test]
    async fn test_docked_colony_with_shops() {
        let mut location = location_response(12, "colony");
        location.has_shops = true;
        let directory = GameDirectory::new(location_room(location, character("docked", Some(12))));

        let result = handle_help(&context("new-ceres"), &directory).await.unwrap();
        let card = result.response;

        let services = card.get_section(SERVICES_SECTION).unwrap();
        assert_eq!(services.lines[0], "🛒 **Shopping Available**");
        assert_eq!(services.lines.len(), 4);
        assert!(
            card.get_section(TIPS_SECTION).unwrap().lines[0].contains("major population centers")
        );
        assert_eq!(
            card.get_section(STATUS_SECTION).unwrap().lines,
            vec![DOCKED_STATUS]
        );
        assert_eq!(card.accent.hex(), "#00ff7f");
    }

    #[tokio::test]
    async fn test_location_lookup_failure() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_get_location()
            .times(1)
            .returning(|_| Err(DirectoryError::AccessError));
        mock_requester.expect_get_character().never();

        let directory = GameDirectory::new(mock_requester);
        let result = handle_help(&context("general"), &directory).await;
        assert!(matches!(result, Err(DirectoryError::AccessError)));
    }

    #[tokio::test]
    async fn test_presence_lookup_failure() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_get_location()
            .times(1)
            .returning(|_| Ok(Some(location_response(1, "shipyard"))));
        mock_requester
            .expect_get_character()
            .times(1)
            .returning(|_| Err(DirectoryError::Status(503)));

        let directory = GameDirectory::new(mock_requester);
        let result = handle_help(&context("dock"), &directory).await;
        assert!(matches!(result, Err(DirectoryError::Status(503))));
    }
}
