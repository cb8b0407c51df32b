// FootyWatch - Web Server
// Thin HTTP gateway in front of the football-data.org v4 API

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use footywatch::{service, Config, FdClient, FootballProvider, MatchRecord};

/// Shared application state
#[derive(Clone)]
struct AppState<P> {
    provider: P,
}

/// Error body returned to clients
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Health check body
#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
}

/// Request-boundary failures, translated to status codes.
/// Upstream detail never leaks to the caller.
enum ApiError {
    Validation(String),
    Upstream,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ApiError::Upstream => (StatusCode::BAD_GATEWAY, "Provider error".to_string()),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

fn default_days() -> i64 {
    7
}

fn default_league() -> String {
    service::DEFAULT_LEAGUE.to_string()
}

#[derive(Deserialize)]
struct LeagueMatchesParams {
    league_name: String,
    #[serde(default = "default_days")]
    days: i64,
}

#[derive(Deserialize)]
struct TeamMatchesParams {
    team_name: String,
    #[serde(default = "default_league")]
    league_name: String,
    #[serde(default = "default_days")]
    days: i64,
}

/// Reject names shorter than two characters before any outbound call.
fn validate_name(param: &str, value: &str) -> Result<(), ApiError> {
    if value.chars().count() < 2 {
        return Err(ApiError::Validation(format!(
            "{} must be at least 2 characters",
            param
        )));
    }
    Ok(())
}

/// Reject out-of-range day windows before any outbound call.
fn validate_days(days: i64, max: i64) -> Result<(), ApiError> {
    if !(1..=max).contains(&days) {
        return Err(ApiError::Validation(format!(
            "days must be between 1 and {}",
            max
        )));
    }
    Ok(())
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { ok: true })
}

/// GET /api/fd/league-matches - Upcoming matches of a league by name
async fn league_matches<P: FootballProvider>(
    State(state): State<AppState<P>>,
    Query(params): Query<LeagueMatchesParams>,
) -> Result<Json<Vec<MatchRecord>>, ApiError> {
    validate_name("league_name", &params.league_name)?;
    validate_days(params.days, service::LEAGUE_WINDOW_MAX_DAYS)?;

    match service::upcoming_league_matches(&state.provider, &params.league_name, params.days).await
    {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            log::error!("league-matches upstream failure: {:#}", e);
            Err(ApiError::Upstream)
        }
    }
}

/// GET /api/fd/team-matches - Upcoming matches of a team inside a league
async fn team_matches<P: FootballProvider>(
    State(state): State<AppState<P>>,
    Query(params): Query<TeamMatchesParams>,
) -> Result<Json<Vec<MatchRecord>>, ApiError> {
    validate_name("team_name", &params.team_name)?;
    validate_name("league_name", &params.league_name)?;
    validate_days(params.days, service::TEAM_WINDOW_MAX_DAYS)?;

    match service::upcoming_team_matches(
        &state.provider,
        &params.team_name,
        &params.league_name,
        params.days,
    )
    .await
    {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            log::error!("team-matches upstream failure: {:#}", e);
            Err(ApiError::Upstream)
        }
    }
}

/// Build the router over any provider implementation.
fn app<P>(provider: P) -> Router
where
    P: FootballProvider + Clone + Send + Sync + 'static,
{
    let api_routes = Router::new()
        .route("/league-matches", get(league_matches::<P>))
        .route("/team-matches", get(team_matches::<P>))
        .with_state(AppState { provider });

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/fd", api_routes)
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    env_logger::init();

    println!("⚽ FootyWatch - Football-Data Gateway v{}", footywatch::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if config.token.is_some() {
        println!("✓ Provider token loaded");
    } else {
        println!("⚠ FOOTBALL_DATA_TOKEN not set - provider may rate-limit unauthenticated calls");
    }

    let provider = FdClient::with_base_url(config.token.clone(), &config.base_url)?;
    println!("✓ Upstream provider: {}", provider.base_url());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    println!("\n🚀 Server running on http://{}", config.bind_addr);
    println!("   GET /health");
    println!("   GET /api/fd/league-matches?league_name=...&days=7");
    println!("   GET /api/fd/team-matches?team_name=...&league_name=...&days=7");

    axum::serve(listener, app(provider)).await?;
    Ok(())
}

// ============================================================================
// Endpoint Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use footywatch::models::{
        ApiCompetition, ApiMatch, ApiMatchTeam, ApiTeam, CompetitionsResponse, MatchesResponse,
        TeamsResponse,
    };
    use footywatch::MatchFilter;

    /// Canned provider standing in for football-data.org.
    #[derive(Clone, Default)]
    struct FixtureProvider {
        competitions: Vec<ApiCompetition>,
        teams: Vec<ApiTeam>,
        matches: Vec<ApiMatch>,
        fail: bool,
    }

    #[async_trait]
    impl FootballProvider for FixtureProvider {
        async fn competitions(&self) -> Result<CompetitionsResponse> {
            if self.fail {
                bail!("HTTP status server error (500) for /competitions");
            }
            Ok(CompetitionsResponse {
                competitions: self.competitions.clone(),
            })
        }

        async fn competition_teams(&self, _code: &str) -> Result<TeamsResponse> {
            if self.fail {
                bail!("HTTP status server error (500) for /teams");
            }
            Ok(TeamsResponse {
                teams: self.teams.clone(),
            })
        }

        async fn competition_matches(
            &self,
            _code: &str,
            _filter: &MatchFilter,
        ) -> Result<MatchesResponse> {
            if self.fail {
                bail!("HTTP status server error (500) for /matches");
            }
            Ok(MatchesResponse {
                matches: self.matches.clone(),
            })
        }

        async fn team_matches(
            &self,
            _team_id: i64,
            _competition_id: i64,
            _filter: &MatchFilter,
        ) -> Result<MatchesResponse> {
            if self.fail {
                bail!("HTTP status server error (500) for /matches");
            }
            Ok(MatchesResponse {
                matches: self.matches.clone(),
            })
        }
    }

    fn premier_league() -> ApiCompetition {
        ApiCompetition {
            id: 2021,
            code: Some("PL".to_string()),
            name: Some("English Premier League".to_string()),
            plan: Some("TIER_ONE".to_string()),
        }
    }

    fn arsenal() -> ApiTeam {
        ApiTeam {
            id: Some(57),
            name: Some("Arsenal FC".to_string()),
            short_name: Some("Arsenal".to_string()),
            tla: Some("ARS".to_string()),
            crest: None,
        }
    }

    fn raw_match(id: i64, utc_date: &str, home: &str, away: &str) -> ApiMatch {
        ApiMatch {
            id: Some(id),
            utc_date: Some(utc_date.to_string()),
            status: Some("SCHEDULED".to_string()),
            matchday: Some(30),
            home_team: Some(ApiMatchTeam {
                name: Some(home.to_string()),
            }),
            away_team: Some(ApiMatchTeam {
                name: Some(away.to_string()),
            }),
            competition: None,
        }
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(app(FixtureProvider::default()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_league_matches_end_to_end() {
        let provider = FixtureProvider {
            competitions: vec![premier_league()],
            matches: vec![
                raw_match(3, "2024-05-04T16:30:00Z", "Liverpool FC", "Tottenham Hotspur FC"),
                raw_match(1, "2024-05-02T14:00:00Z", "Arsenal FC", "Chelsea FC"),
                raw_match(2, "2024-05-03T14:00:00Z", "Everton FC", "Fulham FC"),
            ],
            ..Default::default()
        };

        let (status, body) = get(
            app(provider),
            "/api/fd/league-matches?league_name=English%20Premier%20League&days=7",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let records = body.as_array().expect("array body");
        assert_eq!(records.len(), 3);

        let dates: Vec<&str> = records
            .iter()
            .map(|r| r["utcDate"].as_str().unwrap())
            .collect();
        assert_eq!(
            dates,
            vec![
                "2024-05-02T14:00:00Z",
                "2024-05-03T14:00:00Z",
                "2024-05-04T16:30:00Z"
            ]
        );

        for record in records {
            assert!(record["venue"].is_null());
            assert_eq!(record["competitionCode"], "PL");
            assert_eq!(record["competition"], "English Premier League");
        }
    }

    #[tokio::test]
    async fn test_unresolved_league_yields_empty_200() {
        let provider = FixtureProvider {
            competitions: vec![premier_league()],
            matches: vec![raw_match(1, "2024-05-02T14:00:00Z", "A", "B")],
            ..Default::default()
        };

        let (status, body) = get(
            app(provider),
            "/api/fd/league-matches?league_name=Zzzznotaleague",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_provider_failure_maps_to_502() {
        let provider = FixtureProvider {
            fail: true,
            ..Default::default()
        };

        let (status, body) = get(
            app(provider),
            "/api/fd/league-matches?league_name=premier%20league",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, serde_json::json!({"error": "Provider error"}));
        // Raw provider detail never reaches the caller
        assert!(!body.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_team_matches_default_league() {
        let provider = FixtureProvider {
            competitions: vec![premier_league()],
            teams: vec![arsenal()],
            matches: vec![raw_match(7, "2024-05-05T15:00:00Z", "Arsenal FC", "Chelsea FC")],
            ..Default::default()
        };

        let (status, body) = get(app(provider), "/api/fd/team-matches?team_name=Arsenal").await;

        assert_eq!(status, StatusCode::OK);
        let records = body.as_array().expect("array body");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["home"], "Arsenal FC");
        assert_eq!(records[0]["competitionCode"], "PL");
    }

    #[tokio::test]
    async fn test_short_name_rejected_before_upstream() {
        // A failing provider proves validation short-circuits the call
        let provider = FixtureProvider {
            fail: true,
            ..Default::default()
        };

        let (status, body) = get(app(provider), "/api/fd/league-matches?league_name=x").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("league_name"));
    }

    #[tokio::test]
    async fn test_days_out_of_range_rejected() {
        let provider = FixtureProvider {
            fail: true,
            ..Default::default()
        };

        let (status, _) = get(
            app(provider.clone()),
            "/api/fd/league-matches?league_name=premier%20league&days=31",
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = get(
            app(provider.clone()),
            "/api/fd/league-matches?league_name=premier%20league&days=0",
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        // Team windows stretch to 60
        let (status, _) = get(
            app(provider),
            "/api/fd/team-matches?team_name=Arsenal&days=61",
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_required_param_is_client_error() {
        let (status, _) = get(app(FixtureProvider::default()), "/api/fd/league-matches").await;
        assert!(status.is_client_error());
    }
}
