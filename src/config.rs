// FootyWatch - Configuration
// Environment-backed settings, resolved once at startup and injected

use std::env;

use crate::provider::FD_BASE;

/// Default listen address
pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

/// Server configuration.
///
/// The provider token is carried here as an explicit value and handed to the
/// client at construction; nothing reads the environment per request.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Upstream provider base URL
    pub base_url: String,
    /// Provider auth token; None means unauthenticated calls
    pub token: Option<String>,
}

impl Config {
    /// Load configuration from the environment, reading a `.env` file first
    /// when one exists. A blank token counts as absent.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let token = env::var("FOOTBALL_DATA_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Self {
            bind_addr: env::var("FOOTYWATCH_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()),
            base_url: env::var("FD_BASE").unwrap_or_else(|_| FD_BASE.to_string()),
            token,
        }
    }
}
