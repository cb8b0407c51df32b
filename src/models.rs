// FootyWatch - Data Model
// Domain shapes returned to callers + football-data.org v4 wire payloads

use serde::{Deserialize, Serialize};

// ============================================================================
// DOMAIN SHAPES
// ============================================================================

/// Competition - Provider's canonical identifier triplet for a league.
///
/// Resolved transiently per request, never persisted. `code` can be absent
/// for some provider entries; callers treat a code-less resolution as a miss.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Competition {
    pub code: Option<String>,
    pub id: i64,
    pub name: String,
}

/// Team - Provider's team record, projected to the fields we expose.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub tla: Option<String>,
    pub crest: Option<String>,
}

impl From<&ApiTeam> for Team {
    fn from(t: &ApiTeam) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            short_name: t.short_name.clone(),
            tla: t.tla.clone(),
            crest: t.crest.clone(),
        }
    }
}

/// MatchRecord - The shaped output unit returned to API callers.
///
/// `venue` is always null: the provider does not reliably supply it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub competition: Option<String>,
    pub competition_code: String,
    pub utc_date: Option<String>,
    pub status: Option<String>,
    pub matchday: Option<i64>,
    pub home: Option<String>,
    pub away: Option<String>,
    pub venue: Option<String>,
    pub id: Option<i64>,
}

// ============================================================================
// PROVIDER WIRE PAYLOADS
// ============================================================================

/// Response of GET /competitions
#[derive(Debug, Clone, Deserialize)]
pub struct CompetitionsResponse {
    #[serde(default)]
    pub competitions: Vec<ApiCompetition>,
}

/// One entry of the provider's competition listing.
/// `plan == "TIER_ONE"` marks a top-tier competition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCompetition {
    pub id: i64,
    pub code: Option<String>,
    pub name: Option<String>,
    pub plan: Option<String>,
}

/// Response of GET /competitions/{code}/teams
#[derive(Debug, Clone, Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<ApiTeam>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTeam {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub tla: Option<String>,
    pub crest: Option<String>,
}

/// Response of GET /competitions/{code}/matches and GET /teams/{id}/matches
#[derive(Debug, Clone, Deserialize)]
pub struct MatchesResponse {
    #[serde(default)]
    pub matches: Vec<ApiMatch>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMatch {
    pub id: Option<i64>,
    pub utc_date: Option<String>,
    pub status: Option<String>,
    pub matchday: Option<i64>,
    pub home_team: Option<ApiMatchTeam>,
    pub away_team: Option<ApiMatchTeam>,
    pub competition: Option<ApiMatchCompetition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMatchTeam {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMatchCompetition {
    pub id: Option<i64>,
    pub code: Option<String>,
    pub name: Option<String>,
}
