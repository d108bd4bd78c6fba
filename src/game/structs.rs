//! Domain records for the locations and characters of the game.
//!
//! These are the read-only views the help cards are rendered from. They are
//! built by [`GameDirectory`](crate::game::GameDirectory) out of the game
//! server responses.

/// Category of a location.
///
/// Unknown categories are kept verbatim in [`LocationCategory::Other`] so they
/// can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationCategory {
    Colony,
    SpaceStation,
    Outpost,
    Gate,
    Shipyard,
    MiningStation,
    ResearchFacility,
    MilitaryBase,
    Other(String),
}

impl LocationCategory {
    /// Parses the snake_case category sent by the game server.
    pub fn parse(value: &str) -> Self {
        match value {
            "colony" => LocationCategory::Colony,
            "space_station" => LocationCategory::SpaceStation,
            "outpost" => LocationCategory::Outpost,
            "gate" => LocationCategory::Gate,
            "shipyard" => LocationCategory::Shipyard,
            "mining_station" => LocationCategory::MiningStation,
            "research_facility" => LocationCategory::ResearchFacility,
            "military_base" => LocationCategory::MilitaryBase,
            other => LocationCategory::Other(other.to_owned()),
        }
    }

    /// Snake_case identifier, as the game server spells it.
    pub fn as_str(&self) -> &str {
        match self {
            LocationCategory::Colony => "colony",
            LocationCategory::SpaceStation => "space_station",
            LocationCategory::Outpost => "outpost",
            LocationCategory::Gate => "gate",
            LocationCategory::Shipyard => "shipyard",
            LocationCategory::MiningStation => "mining_station",
            LocationCategory::ResearchFacility => "research_facility",
            LocationCategory::MilitaryBase => "military_base",
            LocationCategory::Other(other) => other,
        }
    }

    /// Human readable label: the identifier with underscores turned into spaces.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

/// Services offered by a location. Every flag is independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Services {
    pub jobs: bool,
    pub shops: bool,
    pub medical: bool,
    pub repairs: bool,
    pub fuel: bool,
    pub upgrades: bool,
}

/// A location bound to a Matrix room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Game identifier of the location
    pub id: i64,
    /// Display name of the location
    pub name: String,
    /// Category of the location
    pub category: LocationCategory,
    /// Services available at the location
    pub services: Services,
}

/// Where a character is relative to its current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockStatus {
    /// Landed at the location, every service is reachable
    Docked,
    /// Orbiting or travelling
    InSpace,
    /// Any status the bot does not know about
    Other(String),
}

impl DockStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "docked" => DockStatus::Docked,
            "in_space" => DockStatus::InSpace,
            other => DockStatus::Other(other.to_owned()),
        }
    }
}

/// Presence of a player's character in the galaxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presence {
    /// Dock status of the character
    pub dock_status: DockStatus,
    /// Location the character is at, if any
    pub current_location: Option<i64>,
}

impl Presence {
    /// Returns `true` if the character is docked at `location_id`.
    pub fn is_docked_at(&self, location_id: i64) -> bool {
        self.dock_status == DockStatus::Docked && self.current_location == Some(location_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_categories() {
        assert_eq!(LocationCategory::parse("colony"), LocationCategory::Colony);
        assert_eq!(
            LocationCategory::parse("space_station"),
            LocationCategory::SpaceStation
        );
        assert_eq!(
            LocationCategory::parse("military_base"),
            LocationCategory::MilitaryBase
        );
    }

    #[test]
    fn test_parse_unknown_category_is_kept() {
        let category = LocationCategory::parse("derelict_hulk");
        assert_eq!(category, LocationCategory::Other("derelict_hulk".to_owned()));
        assert_eq!(category.as_str(), "derelict_hulk");
        assert_eq!(category.label(), "derelict hulk");
    }

    #[test]
    fn test_category_label() {
        assert_eq!(LocationCategory::ResearchFacility.label(), "research facility");
        assert_eq!(LocationCategory::Gate.label(), "gate");
    }

    #[test]
    fn test_parse_dock_status() {
        assert_eq!(DockStatus::parse("docked"), DockStatus::Docked);
        assert_eq!(DockStatus::parse("in_space"), DockStatus::InSpace);
        assert_eq!(
            DockStatus::parse("stranded"),
            DockStatus::Other("stranded".to_owned())
        );
    }

    #[test]
    fn test_is_docked_at() {
        let docked = Presence {
            dock_status: DockStatus::Docked,
            current_location: Some(7),
        };
        assert!(docked.is_docked_at(7));
        assert!(!docked.is_docked_at(8));

        let in_space = Presence {
            dock_status: DockStatus::InSpace,
            current_location: Some(7),
        };
        assert!(!in_space.is_docked_at(7));

        let nowhere = Presence {
            dock_status: DockStatus::Docked,
            current_location: None,
        };
        assert!(!nowhere.is_docked_at(7));
    }
}
