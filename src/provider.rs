// FootyWatch - Upstream Provider Client
// Read-only client for the football-data.org v4 REST API

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::models::{CompetitionsResponse, MatchesResponse, TeamsResponse};

/// Default provider base URL
pub const FD_BASE: &str = "https://api.football-data.org/v4";

/// Auth header expected by the provider
const AUTH_HEADER: &str = "X-Auth-Token";

/// Bounded wait per outbound call; exceeding it is an upstream failure
const REQUEST_TIMEOUT: Duration = Duration::from_secs(25);

/// Date window + status filter attached to match queries.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchFilter {
    /// Inclusive window start, `YYYY-MM-DD`
    pub date_from: String,
    /// Inclusive window end, `YYYY-MM-DD`
    pub date_to: String,
    /// Provider match status, e.g. "SCHEDULED"
    pub status: String,
}

/// The four upstream read operations the gateway consumes.
///
/// The service and resolver are generic over this trait so tests can
/// substitute a fixture provider with canned responses.
#[async_trait]
pub trait FootballProvider {
    /// GET /competitions - full competition listing
    async fn competitions(&self) -> Result<CompetitionsResponse>;

    /// GET /competitions/{code}/teams - teams of one competition
    async fn competition_teams(&self, code: &str) -> Result<TeamsResponse>;

    /// GET /competitions/{code}/matches - matches of one competition
    async fn competition_matches(
        &self,
        code: &str,
        filter: &MatchFilter,
    ) -> Result<MatchesResponse>;

    /// GET /teams/{id}/matches - one team's matches, restricted to a competition
    async fn team_matches(
        &self,
        team_id: i64,
        competition_id: i64,
        filter: &MatchFilter,
    ) -> Result<MatchesResponse>;
}

/// football-data.org HTTP client.
///
/// Holds the injected auth token; an empty or absent token means
/// unauthenticated calls (the provider may rate-limit or reject them).
#[derive(Debug, Clone)]
pub struct FdClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl FdClient {
    /// Create a client against the production base URL.
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url(token, FD_BASE)
    }

    /// Create a client with a custom base URL.
    ///
    /// This is useful for testing against mock servers.
    pub fn with_base_url(token: Option<String>, base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Get the base URL for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single GET with the auth header attached when configured.
    /// Non-2xx statuses, transport errors and malformed bodies all surface
    /// as errors; there are no retries.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.header(AUTH_HEADER, token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("provider rejected {}", url))?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("invalid JSON from {}", url))
    }
}

#[async_trait]
impl FootballProvider for FdClient {
    async fn competitions(&self) -> Result<CompetitionsResponse> {
        self.get_json("/competitions", &[]).await
    }

    async fn competition_teams(&self, code: &str) -> Result<TeamsResponse> {
        self.get_json(&format!("/competitions/{}/teams", code), &[])
            .await
    }

    async fn competition_matches(
        &self,
        code: &str,
        filter: &MatchFilter,
    ) -> Result<MatchesResponse> {
        self.get_json(
            &format!("/competitions/{}/matches", code),
            &[
                ("dateFrom", filter.date_from.clone()),
                ("dateTo", filter.date_to.clone()),
                ("status", filter.status.clone()),
            ],
        )
        .await
    }

    async fn team_matches(
        &self,
        team_id: i64,
        competition_id: i64,
        filter: &MatchFilter,
    ) -> Result<MatchesResponse> {
        self.get_json(
            &format!("/teams/{}/matches", team_id),
            &[
                ("dateFrom", filter.date_from.clone()),
                ("dateTo", filter.date_to.clone()),
                ("status", filter.status.clone()),
                ("competitions", competition_id.to_string()),
            ],
        )
        .await
    }
}
