use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::time::Duration;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub port: u16,
    pub accounts_url: String,
    pub api_url: String,
    pub http_timeout: Duration,
    /// Fixed seed for keyword selection; random per request when unset.
    pub keyword_seed: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv().ok(); // Try loading .env file, ignore if it doesn't exist (e.g. env vars set manually)

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so it can be driven without
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("HTTP_TIMEOUT_SECS is not a number: {raw:?}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let keyword_seed: Option<u64> = lookup("KEYWORD_SEED")
            .map(|raw| {
                raw.trim()
                    .parse()
                    .with_context(|| format!("KEYWORD_SEED is not a number: {raw:?}"))
            })
            .transpose()?;

        Ok(Config {
            client_id: lookup("SPOTIFY_CLIENT_ID")
                .filter(|v| !v.trim().is_empty())
                .context("SPOTIFY_CLIENT_ID is missing from .env or environment")?,
            client_secret: lookup("SPOTIFY_CLIENT_SECRET")
                .filter(|v| !v.trim().is_empty())
                .context("SPOTIFY_CLIENT_SECRET is missing from .env or environment")?,
            port,
            accounts_url: lookup("SPOTIFY_ACCOUNTS_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_ACCOUNTS_URL.to_string()),
            api_url: lookup("SPOTIFY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            http_timeout: Duration::from_secs(timeout_secs),
            keyword_seed,
        })
    }
}
