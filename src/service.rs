// FootyWatch - Match Query Service
// Date windows, upstream match queries, projection and ordering

use anyhow::Result;
use chrono::{Duration, Utc};

use crate::models::{ApiMatch, MatchRecord};
use crate::provider::{FootballProvider, MatchFilter};
use crate::resolver;

/// League assumed when a team query names none
pub const DEFAULT_LEAGUE: &str = "English Premier League";

/// Widest allowed window for league queries, in days
pub const LEAGUE_WINDOW_MAX_DAYS: i64 = 30;

/// Widest allowed window for team queries, in days
pub const TEAM_WINDOW_MAX_DAYS: i64 = 60;

/// Provider status filter for upcoming matches
const SCHEDULED: &str = "SCHEDULED";

/// Matches without a kickoff date sort after every dated match
const MISSING_DATE_SENTINEL: &str = "9999-12-31T00:00:00Z";

/// Clamp a requested window length into [1, max].
pub fn clamp_days(days: i64, max: i64) -> i64 {
    days.clamp(1, max)
}

/// Build the `[today_utc, today_utc + clamp(days, 1, max)]` filter.
fn scheduled_window(days: i64, max: i64) -> MatchFilter {
    let today = Utc::now().date_naive();
    let to = today + Duration::days(clamp_days(days, max));
    MatchFilter {
        date_from: today.format("%Y-%m-%d").to_string(),
        date_to: to.format("%Y-%m-%d").to_string(),
        status: SCHEDULED.to_string(),
    }
}

/// Project one raw provider match onto the exposed record shape.
/// `venue` stays null; the provider does not reliably supply it.
fn project(raw: &ApiMatch, competition: Option<String>, code: &str) -> MatchRecord {
    MatchRecord {
        competition,
        competition_code: code.to_string(),
        utc_date: raw.utc_date.clone(),
        status: raw.status.clone(),
        matchday: raw.matchday,
        home: raw.home_team.as_ref().and_then(|t| t.name.clone()),
        away: raw.away_team.as_ref().and_then(|t| t.name.clone()),
        venue: None,
        id: raw.id,
    }
}

/// Ascending kickoff order; records without a date go last.
fn sort_by_kickoff(records: &mut [MatchRecord]) {
    records.sort_by(|a, b| {
        let a_key = a.utc_date.as_deref().unwrap_or(MISSING_DATE_SENTINEL);
        let b_key = b.utc_date.as_deref().unwrap_or(MISSING_DATE_SENTINEL);
        a_key.cmp(b_key)
    });
}

/// Upcoming scheduled matches of a league picked by free-text name.
///
/// A league that does not resolve (or resolves without a code) yields an
/// empty list. Upstream failures propagate to the caller untouched.
pub async fn upcoming_league_matches<P: FootballProvider>(
    provider: &P,
    league_name: &str,
    days: i64,
) -> Result<Vec<MatchRecord>> {
    let comp = match resolver::resolve_competition(provider, league_name).await? {
        Some(comp) => comp,
        None => return Ok(Vec::new()),
    };
    let code = match comp.code.as_deref() {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => return Ok(Vec::new()),
    };

    let filter = scheduled_window(days, LEAGUE_WINDOW_MAX_DAYS);
    let listing = provider.competition_matches(&code, &filter).await?;

    let mut records: Vec<MatchRecord> = listing
        .matches
        .iter()
        .map(|m| project(m, Some(comp.name.clone()), &code))
        .collect();
    sort_by_kickoff(&mut records);
    Ok(records)
}

/// Upcoming scheduled matches of one team inside a league.
///
/// Resolves the league first, then the team within it; either miss yields an
/// empty list. The upstream query is restricted to the resolved competition.
/// Each record's competition name comes from the raw match itself.
pub async fn upcoming_team_matches<P: FootballProvider>(
    provider: &P,
    team_name: &str,
    league_name: &str,
    days: i64,
) -> Result<Vec<MatchRecord>> {
    let comp = match resolver::resolve_competition(provider, league_name).await? {
        Some(comp) => comp,
        None => return Ok(Vec::new()),
    };
    let code = match comp.code.as_deref() {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => return Ok(Vec::new()),
    };

    let team = match resolver::resolve_team(provider, &code, team_name).await? {
        Some(team) => team,
        None => return Ok(Vec::new()),
    };
    let team_id = match team.id {
        Some(id) => id,
        None => return Ok(Vec::new()),
    };

    let filter = scheduled_window(days, TEAM_WINDOW_MAX_DAYS);
    let listing = provider.team_matches(team_id, comp.id, &filter).await?;

    let mut records: Vec<MatchRecord> = listing
        .matches
        .iter()
        .map(|m| {
            let name = m.competition.as_ref().and_then(|c| c.name.clone());
            project(m, name, &code)
        })
        .collect();
    sort_by_kickoff(&mut records);
    Ok(records)
}
