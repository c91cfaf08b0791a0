use std::env;
use std::time::Duration;

use crate::discovery::Randomness;
use crate::gateway::DEFAULT_CHART_COUNTRY;

/// Application configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub catalog_api_url: String,
    pub ytdlp_path: String,
    pub upstream_timeout: Duration,
    pub request_timeout: Duration,
    pub chart_country: String,
    pub randomness: Randomness,
}

fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = parsed("PORT").unwrap_or(5000);

        let catalog_api_url = env::var("CATALOG_API_URL")
            .map_err(|_| anyhow::anyhow!("CATALOG_API_URL is required"))?;

        let ytdlp_path = env::var("YTDLP_PATH").unwrap_or_else(|_| "yt-dlp".into());

        let upstream_timeout = Duration::from_secs(parsed("UPSTREAM_TIMEOUT_SECS").unwrap_or(15));
        let request_timeout = Duration::from_secs(parsed("REQUEST_TIMEOUT_SECS").unwrap_or(30));

        let chart_country = env::var("CHART_COUNTRY").unwrap_or_else(|_| DEFAULT_CHART_COUNTRY.into());

        let randomness = parsed("DISCOVERY_SEED").map_or(Randomness::Entropy, Randomness::Seeded);

        Ok(Self {
            port,
            catalog_api_url,
            ytdlp_path,
            upstream_timeout,
            request_timeout,
            chart_country,
            randomness,
        })
    }
}
