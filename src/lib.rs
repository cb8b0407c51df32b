// FootyWatch - Core Library
// Name resolution + upcoming-match queries over the football-data.org v4 API

pub mod config;   // Environment-backed settings
pub mod models;   // Domain shapes + provider wire payloads
pub mod provider; // Upstream HTTP client behind the FootballProvider trait
pub mod resolver; // Fuzzy league/team name resolution
pub mod service;  // Date windows, match projection, ordering

// Re-export commonly used types
pub use config::Config;
pub use models::{Competition, MatchRecord, Team};
pub use provider::{FdClient, FootballProvider, MatchFilter, FD_BASE};
pub use resolver::{best_competition, best_team, list_teams, resolve_competition, resolve_team};
pub use service::{
    upcoming_league_matches, upcoming_team_matches, DEFAULT_LEAGUE, LEAGUE_WINDOW_MAX_DAYS,
    TEAM_WINDOW_MAX_DAYS,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
