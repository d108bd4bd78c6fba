//! Help card content.
//!
//! Every card the bot can send is assembled here from fixed text. The only
//! variable card is the location card, which picks its icon, services, tips
//! and status line from the location record and the caller's dock status.

use crate::{
    commands::card::{Accent, Card},
    game::{Location, LocationCategory, Services},
};

const BASIC_ACCENT: Accent = Accent(0x4169e1);
const TRANSIT_ACCENT: Accent = Accent(0xff6600);
const DOCKED_ACCENT: Accent = Accent(0x00ff7f);
const IN_ORBIT_ACCENT: Accent = Accent(0xffa500);
const REFERENCE_ACCENT: Accent = Accent(0x9932cc);
const FAILURE_ACCENT: Accent = Accent(0xdc143c);

pub const SERVICES_SECTION: &str = "🏢 Available Services";
pub const NO_SERVICES_SECTION: &str = "ℹ️ Services";
pub const NO_SERVICES_MESSAGE: &str = "No commercial services available at this location.";
pub const TIPS_SECTION: &str = "💡 Location Tips";
pub const STATUS_SECTION: &str = "📊 Current Status";
pub const ADMIN_SECTION: &str = "⚙️ Admin Commands";
pub const DOCKED_STATUS: &str = "🛬 **Docked** - Full access to all services";
pub const IN_ORBIT_STATUS: &str =
    "🚀 **In Orbit** - Limited service access (dock for full services)";

/// Service blocks, in display order. A block is shown when its predicate holds.
const SERVICE_BLOCKS: [(fn(&Services) -> bool, &[&str]); 6] = [
    (
        |s| s.shops,
        &[
            "🛒 **Shopping Available**",
            "`/shop list` - Browse available items",
            "`/shop buy <item> [quantity]` - Purchase items",
            "`/shop sell <item> [quantity]` - Sell your items",
        ],
    ),
    (
        |s| s.jobs,
        &[
            "💼 **Jobs Available**",
            "`/job list` - View available jobs",
            "`/job accept <job_id>` - Accept a job",
            "`/job status` - Check current job progress",
            "`/job complete` - Complete current job",
        ],
    ),
    (
        |s| s.medical,
        &[
            "🏥 **Medical Services**",
            "• Healing and medical treatment",
            "• Use location panel for medical services",
        ],
    ),
    (
        |s| s.repairs,
        &[
            "🔧 **Ship Repairs**",
            "• Hull repair and maintenance",
            "• System diagnostics and fixes",
        ],
    ),
    (
        |s| s.fuel,
        &[
            "⛽ **Fuel Services**",
            "• Refuel your ship",
            "• Fuel efficiency upgrades",
        ],
    ),
    (
        |s| s.upgrades,
        &[
            "⬆️ **Ship Upgrades**",
            "• Purchase better ships",
            "• Upgrade ship components",
            "• Performance enhancements",
        ],
    ),
];

/// Icon shown in the title of a location card.
pub fn location_icon(category: &LocationCategory) -> &'static str {
    match category {
        LocationCategory::Colony => "🏙️",
        LocationCategory::SpaceStation => "🛰️",
        LocationCategory::Outpost => "🏭",
        LocationCategory::Gate => "🌌",
        LocationCategory::Shipyard => "🚢",
        LocationCategory::MiningStation => "⛏️",
        LocationCategory::ResearchFacility => "🔬",
        LocationCategory::MilitaryBase => "⚔️",
        LocationCategory::Other(_) => "📍",
    }
}

/// Tips for a location category. Only five categories have tips.
pub fn location_tips(category: &LocationCategory) -> Option<&'static [&'static str]> {
    match category {
        LocationCategory::Colony => Some(&[
            "🏙️ Colonies are major population centers",
            "💼 Best source of diverse job opportunities",
            "🛒 Full shopping and services available",
            "📡 Excellent radio transmission range",
        ]),
        LocationCategory::SpaceStation => Some(&[
            "🛰️ Major trading and transport hubs",
            "🚢 Often have shipyard facilities",
            "🌌 Strategic locations on trade routes",
            "👥 Great for finding crew members",
        ]),
        LocationCategory::Outpost => Some(&[
            "🏭 Frontier settlements with basic services",
            "⛏️ Often near resource extraction sites",
            "🔧 Good for repairs and refueling",
            "💰 May have specialized local jobs",
        ]),
        LocationCategory::Gate => Some(&[
            "🌌 Massive structures enabling long-distance travel",
            "⚡ Require significant power and coordination",
            "🚀 Can transport you across vast distances",
            "📡 Advanced communication relay capabilities",
        ]),
        LocationCategory::Shipyard => Some(&[
            "🚢 Specialized ship construction and upgrade facilities",
            "⬆️ Best place to purchase new ships",
            "🔧 Advanced repair and modification services",
            "💰 Often expensive but high-quality services",
        ]),
        _ => None,
    }
}

/// Lines of the services section, empty when the location offers nothing.
pub fn service_lines(services: &Services) -> Vec<&'static str> {
    SERVICE_BLOCKS
        .iter()
        .filter(|(offered, _)| offered(services))
        .flat_map(|(_, block)| block.iter().copied())
        .collect()
}

/// Global help, for rooms that are neither locations nor transit rooms.
pub fn format_basic_help() -> Card {
    Card::new(
        "🌌 Command Guide",
        "Your complete guide to navigating the galaxy",
        BASIC_ACCENT,
    )
    .section(
        "👤 Character Management",
        [
            "`/character create` - Create your character",
            "`/character delete` - Permanently delete your character",
            "`/character login` - Log into the game world",
            "`/character logout` - Safely log out",
            "`/here` - Open your location interaction panel",
            "`/status` - View your character, stats, ship and inventory",
        ],
    )
    .section(
        "🚀 Travel & Navigation",
        [
            "`/travel go` - Travel between locations",
            "`/webmap_status` - View web-map and it's status",
            "📍 Visit location channels to dock and access services",
        ],
    )
    .section(
        "📻 Communication",
        [
            "`/radio send <message>` - Send radio transmission",
            "📡 Range affected by distance & interference",
            "🔄 Messages may be relayed through repeaters",
        ],
    )
    .section(
        "👥 Group System",
        [
            "`/group create <size>` - Start a crew (2-4 members)",
            "`/group join <leader>` - Join someone's crew",
            "`/group leave` - Leave your current crew",
            "`/group travel_vote` - Vote on group travel",
            "`/group job_vote` - Vote on group jobs",
            "`/group vote <Yes/No>` - Cast your vote on group votes",
        ],
    )
    .section(
        "🎯 Quick Start Guide",
        [
            "1️⃣ Create character with `/character create`",
            "2️⃣ Login with `/character login`",
            "3️⃣ Use `/here` for local services",
            "4️⃣ Travel with `/travel go` to explore",
            "5️⃣ Use `/help` in location channels for specific options",
            "6️⃣ Use `/logout` when you're done to ensure your character is safe!",
        ],
    )
    .footer("💡 Tip: Use /help in location channels for specific services and options!")
}

/// Help for transit rooms, while a journey is in progress.
pub fn format_transit_help() -> Card {
    Card::new(
        "🚀 In Transit - Command Guide",
        "You're currently traveling through space",
        TRANSIT_ACCENT,
    )
    .section(
        "🎮 Available Commands",
        [
            "`/status` - Open your interactive character panel",
            "`/here` - Open your interactive location panel",
            "`/radio send <message>` - Send radio transmission",
            "`/galaxy visual_map` - View your route on the galaxy map",
        ],
    )
    .section(
        "⚠️ Transit Limitations",
        [
            "• No shopping or job services",
            "• Limited character interactions",
            "• Cannot change destination mid-journey",
            "• Emergency exit available if needed",
        ],
    )
    .section(
        "🆘 Emergency Commands",
        [
            "If you encounter issues during travel:",
            "• Wait for automatic arrival",
            "• Contact admins if stuck",
            "• Emergency exit (dangerous, last resort)",
        ],
    )
    .section(
        "📻 Radio Communication",
        [
            "• Radio range may be limited during travel",
            "• Corridor interference can affect signals",
            "• Other travelers may be in communication range",
        ],
    )
    .footer("Enjoy the journey! You'll arrive at your destination soon.")
}

/// Help for a location room.
///
/// # Arguments
///
/// * `location` - The location bound to the room
/// * `is_docked` - Whether the caller is docked at this very location
pub fn format_location_help(location: &Location, is_docked: bool) -> Card {
    let accent = if is_docked { DOCKED_ACCENT } else { IN_ORBIT_ACCENT };

    let mut card = Card::new(
        &format!(
            "{} {} - Command Guide",
            location_icon(&location.category),
            location.name
        ),
        &format!(
            "Available commands and services at this {}",
            location.category.label()
        ),
        accent,
    )
    .section(
        "🎮 Core Commands",
        [
            "`/here` - Open interactive location panel",
            "`/status` - Open interactive character panel",
        ],
    );

    let services = service_lines(&location.services);
    card = if services.is_empty() {
        card.section(NO_SERVICES_SECTION, [NO_SERVICES_MESSAGE])
    } else {
        card.section(SERVICES_SECTION, services)
    };

    card = card.section(
        "📻 Communication",
        [
            "`/radio send <message>` - Send radio transmission",
            "💡 Your transmission range depends on local infrastructure",
        ],
    );

    if let Some(tips) = location_tips(&location.category) {
        card = card.section(TIPS_SECTION, tips.iter().copied());
    }

    let status = if is_docked { DOCKED_STATUS } else { IN_ORBIT_STATUS };

    card.section(STATUS_SECTION, [status])
        .footer("💡 Use the location panel (/character location) for interactive service access!")
}

/// Complete command reference. The admin section is only added for admins.
pub fn format_command_reference(is_admin: bool) -> Card {
    let card = Card::new(
        "📚 Complete Command Reference",
        "All available commands organized by category",
        REFERENCE_ACCENT,
    )
    .section(
        "👤 Character Commands",
        [
            "`/character create` - Create new character",
            "`/status` - Open your interactive character panel",
            "`/here` - Open your interactive location panel",
            "`/character login` - Login to game",
            "`/character logout` - Logout safely",
            "`/character delete` - Permanently delete your current character",
        ],
    )
    .section(
        "🚀 Travel Commands",
        [
            "`/travel go` - Travel between locations",
            "`/galaxy visual_map` - Generate a galaxy map",
            "`/travel plotroute` - Plot a route to a destination",
            "`/travel routes` - View Available travel routes",
            "`/webmap status` - Get the webmap status",
        ],
    )
    .section(
        "💰 Economy Commands",
        [
            "`/shop list` - Browse shop items",
            "`/shop buy <item> [qty]` - Buy items",
            "`/shop sell <item> [qty]` - Sell items",
            "`/job list` - View available jobs",
            "`/job accept <id>` - Accept job",
            "`/job status` - Check job progress",
            "`/job complete` - Complete job",
        ],
    )
    .section(
        "👥 Group Commands",
        [
            "`/group create <name>` - Create crew",
            "`/group join <leader>` - Join crew",
            "`/group disband <group>` - Disband your group (leader only)",
            "`/group leave` - Leave crew",
            "`/group info` - View crew info",
            "`/group travel_vote` - Vote on travel",
            "`/group job_vote` - Vote on jobs",
            "`/group vote` - Cast your vote on group votes",
        ],
    )
    .section(
        "📻 Communication Commands",
        ["`/radio send <message>` - Send radio"],
    )
    .section(
        "🎯 Reputation Bounty Commands",
        [
            "`/reputation` - View your regional reputation",
            "`/capture` - Attempt to capture a player of an opposing alignment for a reward",
            "`/bounty` - Attempt to capture a player with a bounty on their head",
            "`/bounties` - View active bounties nearby",
            "`/bounty_status` - Check your bounty capture status and active bounties",
            "`/postbounty <player>` - Post a bounty on another player",
            "`/removebounty <player>` - Remove your posted bounty from another player",
            "`/paybounty` - Pay off your bounties",
            "`/removeallbounties` - Remove *all* of your set bounties",
        ],
    )
    .section(
        "⚔️ Combat Commands",
        [
            "`/attack npc` - Initiate combat with an NPC",
            "`/attack fight` - Make an attack while in combat",
            "`/attack flee` - Attempt to escape from combat",
            "`/rob` - Attempt to rob an NPC",
            "PvP and Player Robberies coming soon...",
        ],
    );

    let card = if is_admin {
        card.section(
            ADMIN_SECTION,
            [
                "`/admin setup` - Initial server setup",
                "`/galaxy generate` - Generate a galaxy for the game",
                "`/web_map start` - Start the webmap service on port 8090",
                "`/web_map stop` - Stop the webmap service",
                "`/export` - Export the current galaxy state in a Wiki format, HTML or Markdown",
                "`/admin teleport` - Teleport players",
                "`/admin reset` - Reset galaxy",
                "`/admin backup` - Backup data",
            ],
        )
    } else {
        card
    };

    card.footer("💡 Use /help in specific locations for contextual assistance!")
}

/// Generic notice sent when the game server could not be read.
pub fn format_failure() -> Card {
    Card::new(
        "⚠️ Help Unavailable",
        "The game server could not be reached. Please try again in a moment.",
        FAILURE_ACCENT,
    )
}

/// Reply for an unknown subcommand.
pub fn format_unknown_command(bot_name: &str) -> String {
    format!(
        "Unknown command. Type `!{} help` for more information.",
        bot_name
    )
}
