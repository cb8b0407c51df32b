// FootyWatch - Name Resolver
// Maps free-text league/team names to provider codes and IDs

use anyhow::Result;

use crate::models::{ApiCompetition, ApiTeam, Competition, Team};
use crate::provider::FootballProvider;

/// Provider plan value marking a top-tier competition
const TIER_ONE: &str = "TIER_ONE";

// ============================================================================
// PURE MATCHING HEURISTICS
// ============================================================================
// Stateless functions over in-memory slices so they are testable against
// fixtures without any network access.

/// Pick the best competition for a free-text query.
///
/// A competition matches when the lowercased query is a substring of the
/// lowercased competition name, or vice versa. The first match in provider
/// list order wins; a later match only replaces it when that match is
/// top-tier and the current best is not. Entries without a name never match.
pub fn best_competition<'a>(
    query: &str,
    competitions: &'a [ApiCompetition],
) -> Option<&'a ApiCompetition> {
    let target = query.trim().to_lowercase();
    if target.is_empty() {
        return None;
    }

    let mut best: Option<&ApiCompetition> = None;
    for comp in competitions {
        let name = match comp.name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n.to_lowercase(),
            _ => continue,
        };
        if !name.contains(&target) && !target.contains(&name) {
            continue;
        }

        match best {
            None => best = Some(comp),
            Some(current) => {
                if comp.plan.as_deref() == Some(TIER_ONE)
                    && current.plan.as_deref() != Some(TIER_ONE)
                {
                    best = Some(comp);
                }
            }
        }
    }
    best
}

/// Pick the best team for a free-text query.
///
/// Primary rule: among teams whose full name contains the query
/// (case-insensitive), the longest full name wins; ties keep provider order.
/// Fallback, only when the primary rule finds nothing: the first team whose
/// short name contains the query, or whose TLA equals it exactly.
pub fn best_team<'a>(query: &str, teams: &'a [ApiTeam]) -> Option<&'a ApiTeam> {
    let target = query.trim().to_lowercase();
    if target.is_empty() {
        return None;
    }

    // Primary: longest full-name containment match
    let mut candidates: Vec<&ApiTeam> = teams
        .iter()
        .filter(|t| {
            t.name
                .as_deref()
                .map(|n| n.to_lowercase().contains(&target))
                .unwrap_or(false)
        })
        .collect();
    candidates.sort_by_key(|t| std::cmp::Reverse(t.name.as_deref().map_or(0, str::len)));
    if let Some(team) = candidates.into_iter().next() {
        return Some(team);
    }

    // Fallback: short-name containment or exact TLA
    teams.iter().find(|t| {
        let short_hit = t
            .short_name
            .as_deref()
            .map(|s| s.to_lowercase().contains(&target))
            .unwrap_or(false);
        let tla_hit = t
            .tla
            .as_deref()
            .map(|tla| tla.to_lowercase() == target)
            .unwrap_or(false);
        short_hit || tla_hit
    })
}

// ============================================================================
// PROVIDER-BACKED RESOLUTION
// ============================================================================

/// Resolve a free-text league name to the provider's `{code, id, name}`.
/// A blank name never hits the provider.
pub async fn resolve_competition<P: FootballProvider>(
    provider: &P,
    name: &str,
) -> Result<Option<Competition>> {
    if name.trim().is_empty() {
        return Ok(None);
    }

    let listing = provider.competitions().await?;
    Ok(
        best_competition(name, &listing.competitions).map(|comp| Competition {
            code: comp.code.clone(),
            id: comp.id,
            name: comp.name.clone().unwrap_or_default(),
        }),
    )
}

/// List all teams of a competition, projected to the exposed shape.
/// An empty code yields an empty list without an upstream call.
pub async fn list_teams<P: FootballProvider>(provider: &P, code: &str) -> Result<Vec<Team>> {
    if code.is_empty() {
        return Ok(Vec::new());
    }

    let listing = provider.competition_teams(code).await?;
    Ok(listing.teams.iter().map(Team::from).collect())
}

/// Resolve a free-text team name inside a competition.
///
/// Fetches the team list once and scans it with both heuristic rules.
pub async fn resolve_team<P: FootballProvider>(
    provider: &P,
    code: &str,
    team_name: &str,
) -> Result<Option<Team>> {
    if code.is_empty() || team_name.trim().is_empty() {
        return Ok(None);
    }

    let listing = provider.competition_teams(code).await?;
    Ok(best_team(team_name, &listing.teams).map(Team::from))
}
